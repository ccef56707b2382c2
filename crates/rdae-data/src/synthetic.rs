//! Procedural clean images.
//!
//! Smooth low-frequency sinusoid fields with a bright disc dropped in at a
//! random position. The point is not realism but structure: piecewise-smooth
//! content a reconstruction network can actually learn, available offline
//! and reproducible from a seed.

use burn::tensor::backend::Backend;
use burn::tensor::{Tensor, TensorData};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use rdae_core::error::{DenoiseError, Result};

/// Generate a pool of `count` clean `[channels, size, size]` images.
pub fn synthetic_pool<B: Backend>(
    count: usize,
    channels: usize,
    size: usize,
    seed: u64,
    device: &B::Device,
) -> Result<Vec<Tensor<B, 3>>> {
    if size == 0 {
        return Err(DenoiseError::invalid_configuration(
            "image_size must be positive",
        ));
    }
    if channels == 0 {
        return Err(DenoiseError::invalid_configuration(
            "channel count must be positive",
        ));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut pool = Vec::with_capacity(count);
    for _ in 0..count {
        pool.push(render(channels, size, &mut rng, device));
    }
    Ok(pool)
}

fn render<B: Backend>(
    channels: usize,
    size: usize,
    rng: &mut StdRng,
    device: &B::Device,
) -> Tensor<B, 3> {
    use std::f32::consts::TAU;

    let fx = rng.random_range(0.5..2.5f32);
    let fy = rng.random_range(0.5..2.5f32);
    let cx = rng.random_range(0.2..0.8f32) * size as f32;
    let cy = rng.random_range(0.2..0.8f32) * size as f32;
    let radius = rng.random_range(0.1..0.25f32) * size as f32;

    let mut values = Vec::with_capacity(channels * size * size);
    for c in 0..channels {
        let phase = c as f32 * 0.31;
        for y in 0..size {
            let yf = y as f32 / size as f32;
            for x in 0..size {
                let xf = x as f32 / size as f32;
                let wave = (TAU * (fx * xf + phase)).sin() * (TAU * (fy * yf + phase)).sin();
                let mut v = 0.5 + 0.2 * wave;
                let dx = x as f32 - cx;
                let dy = y as f32 - cy;
                if dx * dx + dy * dy < radius * radius {
                    v += 0.3;
                }
                values.push(v.clamp(0.0, 1.0));
            }
        }
    }

    Tensor::from_data(
        TensorData::new(values, [channels, size, size]).convert::<B::FloatElem>(),
        device,
    )
}
