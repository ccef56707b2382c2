//! Smooth spatial resampling for image batches.

use burn::tensor::backend::Backend;
use burn::tensor::module::interpolate;
use burn::tensor::ops::{InterpolateMode, InterpolateOptions};
use burn::tensor::Tensor;

/// Resample a `[N, C, H, W]` batch to a new spatial size with bilinear
/// interpolation. A batch already at the target size is returned as-is.
///
/// This is the reconciliation primitive used when a reconstruction network
/// changes spatial resolution; cropping or padding is never an acceptable
/// substitute here.
pub fn resize_bilinear<B: Backend>(batch: Tensor<B, 4>, size: [usize; 2]) -> Tensor<B, 4> {
    let [_, _, h, w] = batch.dims();
    if [h, w] == size {
        return batch;
    }
    interpolate(batch, size, InterpolateOptions::new(InterpolateMode::Bilinear))
}
