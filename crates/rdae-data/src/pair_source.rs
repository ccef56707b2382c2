//! Corrupted/clean pair supply.
//!
//! `CorruptedPairSource` owns a pool of clean images, a noise spec, and a
//! seeded generator, and hands out `(corrupted, clean)` batches for training
//! and evaluation. Clean tensors are copied into each batch, so consumers
//! can hold both sides of a pair after the source has moved on.

use burn::tensor::backend::Backend;
use burn::tensor::Tensor;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::debug;

use rdae_core::error::{DenoiseError, Result};
use rdae_core::noise::NoiseSpec;

/// Batched, shuffled, endlessly repeatable supply of corrupted/clean pairs.
///
/// One full pass over the pool is an epoch; the visitation order reshuffles
/// whenever the pool is exhausted, and a batch may span the boundary, so the
/// stream never runs dry. All configuration problems are rejected here at
/// construction, so `next_batch` cannot fail.
#[derive(Debug)]
pub struct CorruptedPairSource<B: Backend> {
    pool: Vec<Tensor<B, 3>>,
    spec: NoiseSpec,
    batch_size: usize,
    rng: StdRng,
    order: Vec<usize>,
    cursor: usize,
}

impl<B: Backend> CorruptedPairSource<B> {
    /// Build a source over a pool of same-shape clean images.
    ///
    /// # Errors
    /// Configuration errors for an empty pool, images of differing shapes,
    /// a zero batch size, or a batch size exceeding the pool (each index is
    /// visited once per epoch, so a larger batch could not be filled without
    /// repeating samples within one batch).
    pub fn new(
        pool: Vec<Tensor<B, 3>>,
        spec: NoiseSpec,
        batch_size: usize,
        seed: u64,
    ) -> Result<Self> {
        if pool.is_empty() {
            return Err(DenoiseError::invalid_configuration(
                "clean image pool is empty",
            ));
        }
        let shape = pool[0].dims();
        for (i, image) in pool.iter().enumerate().skip(1) {
            if image.dims() != shape {
                return Err(DenoiseError::invalid_configuration(format!(
                    "image {} has shape {:?} but the pool is {:?}",
                    i,
                    image.dims(),
                    shape
                )));
            }
        }
        if batch_size == 0 {
            return Err(DenoiseError::invalid_configuration(
                "batch_size must be positive",
            ));
        }
        if batch_size > pool.len() {
            return Err(DenoiseError::invalid_configuration(format!(
                "batch_size {} exceeds the {} available samples",
                batch_size,
                pool.len()
            )));
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let mut order: Vec<usize> = (0..pool.len()).collect();
        order.shuffle(&mut rng);

        Ok(Self {
            pool,
            spec,
            batch_size,
            rng,
            order,
            cursor: 0,
        })
    }

    /// Shape of every image in the pool, `[C, H, W]`.
    pub fn image_shape(&self) -> [usize; 3] {
        self.pool[0].dims()
    }

    pub fn pool_len(&self) -> usize {
        self.pool.len()
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn noise_spec(&self) -> &NoiseSpec {
        &self.spec
    }

    /// Number of batches in one pass over the pool.
    pub fn batches_per_epoch(&self) -> usize {
        self.pool.len().div_ceil(self.batch_size)
    }

    fn next_index(&mut self) -> usize {
        if self.cursor == self.order.len() {
            self.order.shuffle(&mut self.rng);
            self.cursor = 0;
            debug!("clean pool exhausted, reshuffling for a new epoch");
        }
        let index = self.order[self.cursor];
        self.cursor += 1;
        index
    }

    /// Produce the next `(corrupted, clean)` batch, `[N, C, H, W]` each.
    ///
    /// Every sample gets an independent noise draw from the source's own
    /// generator, so a fixed construction seed reproduces the full stream.
    pub fn next_batch(&mut self) -> (Tensor<B, 4>, Tensor<B, 4>) {
        let mut corrupted = Vec::with_capacity(self.batch_size);
        let mut clean = Vec::with_capacity(self.batch_size);
        for _ in 0..self.batch_size {
            let index = self.next_index();
            let image = self.pool[index].clone();
            corrupted.push(self.spec.apply(&image, &mut self.rng));
            clean.push(image);
        }
        (Tensor::stack(corrupted, 0), Tensor::stack(clean, 0))
    }
}
