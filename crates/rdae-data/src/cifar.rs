//! CIFAR-10 binary-format loader.
//!
//! Reads the `data_batch_*.bin` / `test_batch.bin` shards of the binary
//! CIFAR-10 distribution: each record is one label byte followed by 3072
//! pixel bytes laid out channel-major (R plane, G plane, B plane). Pixels
//! are normalized to `[0, 1]` and returned as `[3, 32, 32]` tensors; labels
//! are discarded since reconstruction training is self-supervised.

use std::path::Path;

use anyhow::{ensure, Context, Result};
use burn::tensor::backend::Backend;
use burn::tensor::{Tensor, TensorData};
use tracing::info;

use rdae_core::resize::resize_bilinear;

pub const CIFAR_CHANNELS: usize = 3;
pub const CIFAR_SIDE: usize = 32;

const PIXELS_PER_RECORD: usize = CIFAR_CHANNELS * CIFAR_SIDE * CIFAR_SIDE;
const RECORD_LEN: usize = 1 + PIXELS_PER_RECORD;

/// Load every record of one binary shard.
pub fn load_bin_file<B: Backend>(path: &Path, device: &B::Device) -> Result<Vec<Tensor<B, 3>>> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("failed to read CIFAR-10 shard {}", path.display()))?;
    ensure!(
        !bytes.is_empty() && bytes.len() % RECORD_LEN == 0,
        "{} is not a CIFAR-10 binary shard ({} bytes is not a multiple of {})",
        path.display(),
        bytes.len(),
        RECORD_LEN
    );

    let mut images = Vec::with_capacity(bytes.len() / RECORD_LEN);
    for record in bytes.chunks_exact(RECORD_LEN) {
        // record[0] is the label
        let pixels: Vec<f32> = record[1..].iter().map(|&b| b as f32 / 255.0).collect();
        images.push(Tensor::from_data(
            TensorData::new(pixels, [CIFAR_CHANNELS, CIFAR_SIDE, CIFAR_SIDE])
                .convert::<B::FloatElem>(),
            device,
        ));
    }
    Ok(images)
}

/// Load all `.bin` shards under a directory into one clean pool, optionally
/// resampled to `image_size` x `image_size`.
pub fn load_dir<B: Backend>(
    dir: &Path,
    image_size: usize,
    device: &B::Device,
) -> Result<Vec<Tensor<B, 3>>> {
    ensure!(image_size > 0, "image_size must be positive");

    let mut shards: Vec<_> = std::fs::read_dir(dir)
        .with_context(|| format!("failed to list {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "bin"))
        .collect();
    shards.sort();
    ensure!(
        !shards.is_empty(),
        "no CIFAR-10 .bin shards found under {}",
        dir.display()
    );

    let mut pool = Vec::new();
    for shard in &shards {
        let mut images = load_bin_file::<B>(shard, device)?;
        if image_size != CIFAR_SIDE {
            images = images
                .into_iter()
                .map(|image| {
                    resize_bilinear(image.unsqueeze::<4>(), [image_size, image_size])
                        .squeeze::<3>(0)
                })
                .collect();
        }
        pool.append(&mut images);
    }
    info!(
        shards = shards.len(),
        images = pool.len(),
        image_size,
        "loaded CIFAR-10 pool"
    );
    Ok(pool)
}
