//! Salt and pepper noise.

use burn::tensor::backend::Backend;
use burn::tensor::Tensor;
use rand::Rng;

use super::{image_from_values, image_values};

/// Flip each element to 0.0 or 1.0 (equal odds) with probability `level`.
/// Unaffected elements pass through untouched, so the corruption is sparse
/// and high-contrast rather than additive.
pub(crate) fn corrupt<B: Backend>(
    clean: &Tensor<B, 3>,
    level: f32,
    rng: &mut impl Rng,
) -> Tensor<B, 3> {
    let shape = clean.dims();
    let mut values = image_values(clean);
    for v in values.iter_mut() {
        if rng.random::<f32>() < level {
            *v = if rng.random_bool(0.5) { 1.0 } else { 0.0 };
        }
    }
    image_from_values(values, shape, &clean.device())
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn_ndarray::NdArray;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    type B = NdArray<f32>;

    #[test]
    fn test_flip_fraction_converges_to_level() {
        let device = Default::default();
        let clean = image_from_values::<B>(vec![0.5f32; 128 * 128], [1, 128, 128], &device);

        let level = 0.2;
        let mut rng = StdRng::seed_from_u64(11);
        let corrupted = corrupt(&clean, level, &mut rng);

        let flipped = image_values(&corrupted)
            .iter()
            .filter(|&&v| v != 0.5)
            .count();
        let fraction = flipped as f32 / (128.0 * 128.0);
        assert!(
            (fraction - level).abs() < 0.02,
            "flip fraction {} too far from {}",
            fraction,
            level
        );
    }

    #[test]
    fn test_flipped_elements_are_extremes() {
        let device = Default::default();
        let clean = image_from_values::<B>(vec![0.5f32; 3 * 32 * 32], [3, 32, 32], &device);

        let mut rng = StdRng::seed_from_u64(12);
        let corrupted = corrupt(&clean, 0.3, &mut rng);

        for v in image_values(&corrupted) {
            assert!(
                v == 0.5 || v == 0.0 || v == 1.0,
                "element {} is neither untouched nor an extreme",
                v
            );
        }
    }
}
