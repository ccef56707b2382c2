//! Additive gaussian noise.

use burn::tensor::backend::Backend;
use burn::tensor::Tensor;
use rand::Rng;

use super::normal_field;

/// Add zero-mean normal noise with standard deviation `level` to every
/// element independently, then clamp back into `[0, 1]`.
pub(crate) fn corrupt<B: Backend>(
    clean: &Tensor<B, 3>,
    level: f32,
    rng: &mut impl Rng,
) -> Tensor<B, 3> {
    let noise = normal_field(clean, level, rng);
    (clean.clone() + noise).clamp(0.0, 1.0)
}
