use burn::tensor::Tensor;
use burn_ndarray::NdArray;
use rdae_core::noise::{NoiseKind, NoiseSpec};
use rdae_data::CorruptedPairSource;

type Backend = NdArray<f32>;

fn distinct_pool(count: usize) -> Vec<Tensor<Backend, 3>> {
    let device = Default::default();
    (0..count)
        .map(|i| {
            Tensor::<Backend, 1>::from_floats(
                vec![(i + 1) as f32 / (count + 1) as f32; 4].as_slice(),
                &device,
            )
            .reshape([1, 2, 2])
        })
        .collect()
}

/// With batch size 1, one epoch of draws visits every pool image exactly
/// once before any reshuffle.
#[test]
fn test_epoch_visits_each_image_once() {
    let count = 12;
    let spec = NoiseSpec::new(NoiseKind::Gaussian, 0.0).unwrap();
    let mut source = CorruptedPairSource::new(distinct_pool(count), spec, 1, 17).unwrap();

    let mut seen = Vec::new();
    for _ in 0..source.batches_per_epoch() {
        let (_, clean) = source.next_batch();
        seen.push(clean.mean().into_scalar());
    }
    seen.sort_by(|a, b| a.partial_cmp(b).unwrap());

    for (i, mean) in seen.iter().enumerate() {
        let expected = (i + 1) as f32 / (count + 1) as f32;
        assert!(
            (mean - expected).abs() < 1e-6,
            "epoch skipped or repeated an image: {} vs {}",
            mean,
            expected
        );
    }
}

/// Different seeds reshuffle into different visitation orders.
#[test]
fn test_seed_changes_order() {
    let spec = NoiseSpec::new(NoiseKind::Gaussian, 0.0).unwrap();
    let order = |seed: u64| {
        let mut source = CorruptedPairSource::new(distinct_pool(16), spec, 1, seed).unwrap();
        (0..16)
            .map(|_| source.next_batch().1.mean().into_scalar())
            .collect::<Vec<f32>>()
    };
    assert_ne!(order(1), order(2));
}
