//! Poisson (shot) noise.

use burn::tensor::backend::Backend;
use burn::tensor::Tensor;
use rand::Rng;
use rand_distr::{Distribution, Poisson};

use super::{image_from_values, image_values};

/// Signal-dependent shot noise.
///
/// Each element is scaled into a photon-count domain by `1 / level`, a
/// Poisson draw with that count as the rate replaces it, and the draw is
/// scaled back and clamped. Smaller levels mean more photons and therefore
/// less apparent noise. A level of 0 never reaches this function; the
/// dispatch layer treats it as a pass-through rather than a division fault.
pub(crate) fn corrupt<B: Backend>(
    clean: &Tensor<B, 3>,
    level: f32,
    rng: &mut impl Rng,
) -> Tensor<B, 3> {
    let shape = clean.dims();
    let scale = 1.0 / level;
    let mut values = image_values(clean);
    for v in values.iter_mut() {
        let rate = (*v * scale) as f64;
        *v = if rate > 0.0 {
            let photons = Poisson::new(rate)
                .expect("positive finite poisson rate")
                .sample(rng);
            (photons as f32 / scale).clamp(0.0, 1.0)
        } else {
            // Zero signal means zero photons.
            0.0
        };
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
    fn test_zero_signal_stays_zero() {
        let device = Default::default();
        let clean = image_from_values::<B>(vec![0.0f32; 3 * 8 * 8], [3, 8, 8], &device);

        let mut rng = StdRng::seed_from_u64(21);
        let corrupted = corrupt(&clean, 0.5, &mut rng);

        assert!(image_values(&corrupted).iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_output_stays_in_range() {
        let device = Default::default();
        let clean = image_from_values::<B>(vec![0.9f32; 3 * 16 * 16], [3, 16, 16], &device);

        let mut rng = StdRng::seed_from_u64(22);
        let corrupted = corrupt(&clean, 0.8, &mut rng);

        for v in image_values(&corrupted) {
            assert!((0.0..=1.0).contains(&v), "escaped range: {}", v);
        }
    }

    #[test]
    fn test_higher_level_means_more_noise() {
        let device = Default::default();
        let clean = image_from_values::<B>(vec![0.5f32; 64 * 64], [1, 64, 64], &device);

        let deviation = |level: f32, seed: u64| {
            let mut rng = StdRng::seed_from_u64(seed);
            let corrupted = corrupt(&clean, level, &mut rng);
            image_values(&corrupted)
                .iter()
                .map(|v| (v - 0.5).powi(2))
                .sum::<f32>()
                / (64.0 * 64.0)
        };

        assert!(deviation(0.5, 23) > deviation(0.02, 23));
    }
}
