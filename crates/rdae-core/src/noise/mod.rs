//! Noise model implementations.
//!
//! This module contains the four corruption models applied to clean images
//! before they are handed to a reconstruction network. Every model is a pure
//! function of the clean image, the noise level, and an explicitly passed
//! random generator, so corrupted draws are reproducible under a fixed seed
//! and safe to run from independent workers holding their own generators.
//!
//! Images are `[channel, height, width]` tensors with values in `[0, 1]`.
//! Each model preserves that range; a level of `0` is an exact no-op for all
//! four kinds.

pub mod gaussian;
pub mod poisson;
pub mod salt_pepper;
pub mod speckle;

use std::fmt;
use std::str::FromStr;

use burn::tensor::backend::Backend;
use burn::tensor::{Tensor, TensorData};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use crate::error::{DenoiseError, Result};

/// Noise level used when none is configured.
pub const DEFAULT_NOISE_LEVEL: f32 = 0.15;

/// The closed set of supported corruption models.
///
/// Dispatch is an exhaustive match, so adding a kind is a compile-time
/// checked change rather than a runtime string branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoiseKind {
    /// Additive zero-mean normal noise with standard deviation `level`.
    Gaussian,
    /// Each element flips to the minimum or maximum value with probability `level`.
    SaltPepper,
    /// Signal-dependent shot noise in a photon-count domain scaled by `1 / level`.
    Poisson,
    /// Multiplicative noise: `clean + clean * N(0, level^2)`.
    Speckle,
}

impl NoiseKind {
    /// All supported kinds, in declaration order.
    pub const ALL: [NoiseKind; 4] = [
        NoiseKind::Gaussian,
        NoiseKind::SaltPepper,
        NoiseKind::Poisson,
        NoiseKind::Speckle,
    ];

    /// The configuration string for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            NoiseKind::Gaussian => "gaussian",
            NoiseKind::SaltPepper => "salt_pepper",
            NoiseKind::Poisson => "poisson",
            NoiseKind::Speckle => "speckle",
        }
    }
}

impl fmt::Display for NoiseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NoiseKind {
    type Err = DenoiseError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "gaussian" => Ok(NoiseKind::Gaussian),
            "salt_pepper" => Ok(NoiseKind::SaltPepper),
            "poisson" => Ok(NoiseKind::Poisson),
            "speckle" => Ok(NoiseKind::Speckle),
            other => Err(DenoiseError::invalid_configuration(format!(
                "unknown noise kind {:?}; expected one of gaussian, salt_pepper, poisson, speckle",
                other
            ))),
        }
    }
}

/// Immutable corruption configuration: which model to run and how hard.
///
/// Validated once when the pipeline is assembled; `apply` cannot fail after
/// that.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseSpec {
    kind: NoiseKind,
    level: f32,
}

impl NoiseSpec {
    /// Create a spec, rejecting levels outside `[0, 1]`.
    pub fn new(kind: NoiseKind, level: f32) -> Result<Self> {
        if !(0.0..=1.0).contains(&level) {
            return Err(DenoiseError::invalid_configuration(format!(
                "noise level must be in [0, 1], got {}",
                level
            )));
        }
        Ok(Self { kind, level })
    }

    /// Create a spec with the default level of 0.15.
    pub fn with_default_level(kind: NoiseKind) -> Self {
        Self {
            kind,
            level: DEFAULT_NOISE_LEVEL,
        }
    }

    pub fn kind(&self) -> NoiseKind {
        self.kind
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    /// Corrupt a clean `[C, H, W]` image.
    ///
    /// The input is never mutated; the result is a fresh tensor in `[0, 1]`.
    /// Deterministic given the generator state.
    pub fn apply<B: Backend>(&self, clean: &Tensor<B, 3>, rng: &mut impl Rng) -> Tensor<B, 3> {
        if self.level == 0.0 {
            return clean.clone();
        }
        match self.kind {
            NoiseKind::Gaussian => gaussian::corrupt(clean, self.level, rng),
            NoiseKind::SaltPepper => salt_pepper::corrupt(clean, self.level, rng),
            NoiseKind::Poisson => poisson::corrupt(clean, self.level, rng),
            NoiseKind::Speckle => speckle::corrupt(clean, self.level, rng),
        }
    }
}

/// Read an image tensor out into f32 values, row-major.
pub(crate) fn image_values<B: Backend>(image: &Tensor<B, 3>) -> Vec<f32> {
    image
        .to_data()
        .convert::<f32>()
        .to_vec::<f32>()
        .expect("image tensor data converts to f32")
}

/// Rebuild an image tensor from f32 values.
pub(crate) fn image_from_values<B: Backend>(
    values: Vec<f32>,
    shape: [usize; 3],
    device: &B::Device,
) -> Tensor<B, 3> {
    Tensor::from_data(
        TensorData::new(values, shape).convert::<B::FloatElem>(),
        device,
    )
}

/// Draw an elementwise zero-mean normal field shaped like `like`.
pub(crate) fn normal_field<B: Backend>(
    like: &Tensor<B, 3>,
    std_dev: f32,
    rng: &mut impl Rng,
) -> Tensor<B, 3> {
    let shape = like.dims();
    let count = shape.iter().product::<usize>();
    let normal = Normal::new(0.0f32, std_dev).expect("noise level validated at construction");
    let values: Vec<f32> = (0..count).map(|_| normal.sample(rng)).collect();
    image_from_values(values, shape, &like.device())
}
