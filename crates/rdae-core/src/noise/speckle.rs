//! Multiplicative speckle noise.

use burn::tensor::backend::Backend;
use burn::tensor::Tensor;
use rand::Rng;

use super::normal_field;

/// Multiplicative noise: `clean + clean * n` with `n ~ N(0, level^2)`,
/// clamped to `[0, 1]`. The perturbation scales with local intensity, so
/// dark regions stay nearly clean while bright regions fluctuate, unlike
/// the uniform magnitude of additive gaussian noise.
pub(crate) fn corrupt<B: Backend>(
    clean: &Tensor<B, 3>,
    level: f32,
    rng: &mut impl Rng,
) -> Tensor<B, 3> {
    let noise = normal_field(clean, level, rng);
    (clean.clone() + clean.clone() * noise).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::{image_from_values, image_values};
    use burn_ndarray::NdArray;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    type B = NdArray<f32>;

    #[test]
    fn test_black_image_is_untouched() {
        let device = Default::default();
        let clean = image_from_values::<B>(vec![0.0f32; 3 * 8 * 8], [3, 8, 8], &device);

        let mut rng = StdRng::seed_from_u64(31);
        let corrupted = corrupt(&clean, 0.9, &mut rng);

        assert!(image_values(&corrupted).iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_output_stays_in_range() {
        let device = Default::default();
        let clean = image_from_values::<B>(vec![1.0f32; 3 * 16 * 16], [3, 16, 16], &device);

        let mut rng = StdRng::seed_from_u64(32);
        let corrupted = corrupt(&clean, 1.0, &mut rng);

        for v in image_values(&corrupted) {
            assert!((0.0..=1.0).contains(&v), "escaped range: {}", v);
        }
    }

    #[test]
    fn test_perturbation_scales_with_intensity() {
        let device = Default::default();
        let n = 64 * 64;
        let dim = vec![0.1f32; n];
        let bright = vec![0.9f32; n];

        let spread = |values: Vec<f32>, base: f32| {
            let clean = image_from_values::<B>(values, [1, 64, 64], &device);
            let mut rng = StdRng::seed_from_u64(33);
            let corrupted = corrupt(&clean, 0.3, &mut rng);
            image_values(&corrupted)
                .iter()
                .map(|v| (v - base).powi(2))
                .sum::<f32>()
                / n as f32
        };

        assert!(spread(bright, 0.9) > spread(dim, 0.1));
    }
}
