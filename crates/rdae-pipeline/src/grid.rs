//! Sample grid PNG output.
//!
//! Lays corrupted / clean / reconstructed rows side by side, one column per
//! sample, for eyeballing what the network actually learned.

use std::path::Path;

use anyhow::{ensure, Context, Result};
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;
use image::{Rgb, RgbImage};
use tracing::info;

use rdae_core::resize::resize_bilinear;

/// Write `n_samples` columns of (corrupted, clean, reconstructed) tiles to
/// `path` as one PNG. Batches whose spatial shape differs from the corrupted
/// batch's are resampled so the tiles line up; grayscale batches render with
/// the channel replicated across RGB.
pub fn save_grid<B: Backend>(
    corrupted: &Tensor<B, 4>,
    clean: &Tensor<B, 4>,
    reconstructed: &Tensor<B, 4>,
    n_samples: usize,
    path: &Path,
) -> Result<()> {
    ensure!(n_samples > 0, "n_samples must be positive");
    let [batch, channels, height, width] = corrupted.dims();
    ensure!(
        channels == 1 || channels == 3,
        "can only render 1- or 3-channel images, got {}",
        channels
    );
    let n_samples = n_samples.min(batch);

    let rows = [
        tile_values(corrupted, [height, width]),
        tile_values(clean, [height, width]),
        tile_values(reconstructed, [height, width]),
    ];

    let mut canvas = RgbImage::new((n_samples * width) as u32, (3 * height) as u32);
    for (row, values) in rows.iter().enumerate() {
        for sample in 0..n_samples {
            for y in 0..height {
                for x in 0..width {
                    let pixel = |c: usize| {
                        let idx = ((sample * channels + c) * height + y) * width + x;
                        (values[idx].clamp(0.0, 1.0) * 255.0).round() as u8
                    };
                    let rgb = if channels == 3 {
                        [pixel(0), pixel(1), pixel(2)]
                    } else {
                        [pixel(0); 3]
                    };
                    canvas.put_pixel(
                        (sample * width + x) as u32,
                        (row * height + y) as u32,
                        Rgb(rgb),
                    );
                }
            }
        }
    }

    canvas
        .save(path)
        .with_context(|| format!("failed to write sample grid to {}", path.display()))?;
    info!(path = %path.display(), samples = n_samples, "sample grid written");
    Ok(())
}

fn tile_values<B: Backend>(batch: &Tensor<B, 4>, size: [usize; 2]) -> Vec<f32> {
    resize_bilinear(batch.clone(), size)
        .to_data()
        .convert::<f32>()
        .to_vec::<f32>()
        .expect("batch tensor data converts to f32")
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::tensor::Distribution;
    use burn_ndarray::NdArray;

    type B = NdArray<f32>;

    #[test]
    fn test_grid_dimensions() {
        let device = Default::default();
        let make = |shape: [usize; 4]| {
            Tensor::<B, 4>::random(shape, Distribution::Uniform(0.0, 1.0), &device)
        };
        let corrupted = make([6, 3, 8, 8]);
        let clean = make([6, 3, 8, 8]);
        let reconstructed = make([6, 3, 4, 4]); // resampled up to 8x8 for display

        let path = std::env::temp_dir().join("rdae_grid_test.png");
        save_grid(&corrupted, &clean, &reconstructed, 4, &path).unwrap();

        let written = image::open(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(written.width(), 4 * 8);
        assert_eq!(written.height(), 3 * 8);
    }

    #[test]
    fn test_zero_samples_rejected() {
        let device = Default::default();
        let batch = Tensor::<B, 4>::random([1, 1, 4, 4], Distribution::Uniform(0.0, 1.0), &device);
        let path = std::env::temp_dir().join("rdae_grid_unused.png");
        assert!(save_grid(&batch, &batch.clone(), &batch.clone(), 0, &path).is_err());
    }
}
