//! Training session driver.
//!
//! A generic iterate-minimize-loss loop: pull a corrupted/clean batch, run
//! the reconstruction forward, take the MSE against the clean target, and
//! step Adam. The network is opaque here; anything with the autoencoder's
//! forward contract trains the same way.

use burn::config::Config;
use burn::nn::loss::{MseLoss, Reduction};
use burn::optim::{AdamConfig, GradientsParams, Optimizer};
use burn::tensor::backend::AutodiffBackend;
use burn::tensor::ElementConversion;
use tracing::info;

use rdae_core::resize::resize_bilinear;
use rdae_data::CorruptedPairSource;
use rdae_model::DenoisingAutoencoder;

/// Training hyperparameters.
#[derive(Config, Debug)]
pub struct TrainingConfig {
    #[config(default = "5")]
    pub epochs: usize,
    #[config(default = "1.0e-3")]
    pub learning_rate: f64,
}

/// Train the model against the pair source for the configured epochs.
///
/// When the network changes spatial resolution, the clean target is
/// resampled to the output's shape before the loss, mirroring what the
/// evaluation layer does at scoring time. Returns the trained model and the
/// mean loss per epoch.
pub fn train<B: AutodiffBackend>(
    mut model: DenoisingAutoencoder<B>,
    source: &mut CorruptedPairSource<B>,
    config: &TrainingConfig,
) -> (DenoisingAutoencoder<B>, Vec<f32>) {
    let mut optimizer = AdamConfig::new().init();
    let loss_fn = MseLoss::new();
    let batches = source.batches_per_epoch();
    let mut epoch_losses = Vec::with_capacity(config.epochs);

    for epoch in 1..=config.epochs {
        let mut total = 0.0f32;
        for _ in 0..batches {
            let (corrupted, clean) = source.next_batch();
            let output = model.forward(corrupted);
            let [_, _, out_h, out_w] = output.dims();
            let clean = resize_bilinear(clean, [out_h, out_w]);

            let loss = loss_fn.forward(output, clean, Reduction::Mean);
            total += loss.clone().into_scalar().elem::<f32>();

            let grads = GradientsParams::from_grads(loss.backward(), &model);
            model = optimizer.step(config.learning_rate, model, grads);
        }
        let mean = total / batches as f32;
        epoch_losses.push(mean);
        info!(epoch, total_epochs = config.epochs, loss = mean, "epoch complete");
    }

    (model, epoch_losses)
}
