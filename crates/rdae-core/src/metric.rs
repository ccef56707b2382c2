//! Reconstruction quality metrics.
//!
//! MSE is pooled over all elements of both batches jointly (one mean across
//! batch, channel, and spatial axes) rather than averaged per sample. PSNR
//! is derived from that pooled value. Shape reconciliation is deliberately
//! NOT done here; a caller holding differently shaped batches must resample
//! them first (see the evaluation layer), so a mismatch is surfaced as an
//! error instead of being silently broadcast or truncated.

use burn::tensor::backend::Backend;
use burn::tensor::{ElementConversion, Tensor};

use crate::error::{DenoiseError, Result};

/// Maximum representable intensity for `[0, 1]`-normalized images.
pub const MAX_INTENSITY: f32 = 1.0;

/// Pooled mean squared error between two equal-shape tensors.
pub fn mse<B: Backend, const D: usize>(
    reference: &Tensor<B, D>,
    candidate: &Tensor<B, D>,
) -> Result<f32> {
    if reference.dims() != candidate.dims() {
        return Err(DenoiseError::ShapeMismatch {
            expected: reference.dims().to_vec(),
            actual: candidate.dims().to_vec(),
        });
    }
    let diff = reference.clone() - candidate.clone();
    Ok(diff.powf_scalar(2.0).mean().into_scalar().elem::<f32>())
}

/// Peak signal-to-noise ratio in decibels; higher is better.
///
/// `PSNR = 10 * log10(MAX^2 / MSE)` with `MAX = 1.0`. Bit-identical inputs
/// have zero MSE and score positive infinity by contract; callers must be
/// prepared for that rather than treating it as a fault.
pub fn psnr<B: Backend, const D: usize>(
    reference: &Tensor<B, D>,
    candidate: &Tensor<B, D>,
) -> Result<f32> {
    let mse = mse(reference, candidate)?;
    if mse == 0.0 {
        return Ok(f32::INFINITY);
    }
    Ok(10.0 * (MAX_INTENSITY * MAX_INTENSITY / mse).log10())
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn_ndarray::NdArray;

    type B = NdArray<f32>;

    fn constant_batch(value: f32, device: &<B as Backend>::Device) -> Tensor<B, 4> {
        Tensor::<B, 1>::from_floats(vec![value; 2 * 3 * 4 * 4].as_slice(), device)
            .reshape([2, 3, 4, 4])
    }

    #[test]
    fn test_identical_batches_score_infinity() {
        let device = Default::default();
        let batch = constant_batch(0.5, &device);
        assert_eq!(psnr(&batch, &batch.clone()).unwrap(), f32::INFINITY);
    }

    #[test]
    fn test_known_mse_value() {
        let device = Default::default();
        let a = constant_batch(0.75, &device);
        let b = constant_batch(0.25, &device);
        let mse = mse(&a, &b).unwrap();
        assert!((mse - 0.25).abs() < 1e-6, "got {}", mse);

        // 10 * log10(1 / 0.25)
        let psnr = psnr(&a, &b).unwrap();
        assert!((psnr - 6.0206).abs() < 1e-3, "got {}", psnr);
    }

    #[test]
    fn test_psnr_is_symmetric() {
        let device = Default::default();
        let a = Tensor::<B, 1>::from_floats([0.1, 0.4, 0.9, 0.2], &device).reshape([1, 1, 2, 2]);
        let b = Tensor::<B, 1>::from_floats([0.3, 0.4, 0.5, 0.8], &device).reshape([1, 1, 2, 2]);
        let ab = psnr(&a, &b).unwrap();
        let ba = psnr(&b, &a).unwrap();
        assert!((ab - ba).abs() < 1e-5);
    }

    #[test]
    fn test_shape_mismatch_is_an_error() {
        let device = Default::default();
        let a = constant_batch(0.5, &device);
        let b = Tensor::<B, 1>::from_floats(vec![0.5f32; 2 * 3 * 2 * 2].as_slice(), &device)
            .reshape([2, 3, 2, 2]);
        let err = psnr(&a, &b).unwrap_err();
        match err {
            DenoiseError::ShapeMismatch { expected, actual } => {
                assert_eq!(expected, vec![2, 3, 4, 4]);
                assert_eq!(actual, vec![2, 3, 2, 2]);
            }
            other => panic!("expected shape mismatch, got {:?}", other),
        }
    }
}
