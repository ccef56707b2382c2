//! Before/after quality report.

use burn::tensor::backend::Backend;
use burn::tensor::Tensor;
use tracing::warn;

use rdae_core::error::{DenoiseError, Result};
use rdae_core::metric::psnr;
use rdae_core::resize::resize_bilinear;

/// How to treat a reconstruction whose spatial shape differs from the clean
/// reference's. Resampling never happens unless asked for; the default
/// surfaces a resolution-changing network as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShapePolicy {
    /// Surface the mismatch as a shape error.
    #[default]
    Strict,
    /// Resample the clean and corrupted references to the reconstruction's
    /// shape (bilinear) and score everything at that resolution. Logged at
    /// WARN whenever it actually fires.
    ResampleToReconstruction,
}

/// PSNR of the corrupted and reconstructed batches against the clean
/// reference, in decibels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaluationReport {
    pub psnr_noisy: f32,
    pub psnr_denoised: f32,
}

impl EvaluationReport {
    /// Score a reconstruction.
    ///
    /// Under `ResampleToReconstruction`, a resolution-changing network gets
    /// both reference batches resampled to its output shape, so the before
    /// and after scores are always measured at the same resolution.
    /// Batch-axis or channel disagreements are never reconciled and surface
    /// as shape mismatch errors under either policy.
    pub fn from_batches<B: Backend>(
        clean: &Tensor<B, 4>,
        corrupted: &Tensor<B, 4>,
        reconstructed: &Tensor<B, 4>,
        policy: ShapePolicy,
    ) -> Result<Self> {
        let [_, _, clean_h, clean_w] = clean.dims();
        let [_, _, out_h, out_w] = reconstructed.dims();

        let (clean, corrupted) = if [clean_h, clean_w] == [out_h, out_w] {
            (clean.clone(), corrupted.clone())
        } else {
            match policy {
                ShapePolicy::Strict => {
                    return Err(DenoiseError::ShapeMismatch {
                        expected: clean.dims().to_vec(),
                        actual: reconstructed.dims().to_vec(),
                    });
                }
                ShapePolicy::ResampleToReconstruction => {
                    warn!(
                        reference = ?[clean_h, clean_w],
                        reconstruction = ?[out_h, out_w],
                        "reconstruction changed spatial shape; scoring at its resolution"
                    );
                    (
                        resize_bilinear(clean.clone(), [out_h, out_w]),
                        resize_bilinear(corrupted.clone(), [out_h, out_w]),
                    )
                }
            }
        };

        Ok(Self {
            psnr_noisy: psnr(&clean, &corrupted)?,
            psnr_denoised: psnr(&clean, reconstructed)?,
        })
    }

    /// Quality gained by the reconstruction, in dB.
    pub fn improvement(&self) -> f32 {
        self.psnr_denoised - self.psnr_noisy
    }
}
