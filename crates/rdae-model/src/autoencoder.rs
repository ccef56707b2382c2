//! Convolutional denoising autoencoder.
//!
//! Stride-2 convolutions compress the corrupted input into a bottleneck and
//! mirrored transposed convolutions expand it back; a sigmoid head keeps the
//! reconstruction inside `[0, 1]`.
//!
//! # Architecture (default `[32, 64, 128]` features, 3 input channels)
//!
//! ```text
//! Input: [batch, 3, H, W]
//!     │ conv 3x3 /2 + relu
//!     ▼
//! [batch, 32, H/2, W/2]
//!     │ conv 3x3 /2 + relu
//!     ▼
//! [batch, 64, H/4, W/4]
//!     │ conv 3x3 /2 + relu
//!     ▼
//! [batch, 128, H/8, W/8]          bottleneck
//!     │ deconv 3x3 x2 + relu  (x2)
//!     │ deconv 3x3 x2 + sigmoid
//!     ▼
//! Output: [batch, 3, H, W]
//! ```
//!
//! Output spatial size equals the input's whenever H and W are divisible by
//! `2^stages`; otherwise the caller reconciles shapes by resampling, never
//! this module.

use burn::config::Config;
use burn::module::Module;
use burn::nn::conv::{Conv2d, Conv2dConfig, ConvTranspose2d, ConvTranspose2dConfig};
use burn::nn::PaddingConfig2d;
use burn::tensor::activation::{relu, sigmoid};
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

/// Configuration for the denoising autoencoder.
#[derive(Config, Debug)]
pub struct DenoisingAutoencoderConfig {
    /// Feature widths per encoder stage, shallow to deep.
    pub features: Vec<usize>,
    /// Number of image channels in and out.
    #[config(default = "3")]
    pub in_channels: usize,
}

impl DenoisingAutoencoderConfig {
    /// Initialize the model on the given device.
    pub fn init<B: Backend>(&self, device: &B::Device) -> DenoisingAutoencoder<B> {
        assert!(
            !self.features.is_empty(),
            "autoencoder needs at least one feature stage"
        );

        let mut encoder = Vec::with_capacity(self.features.len());
        let mut in_channels = self.in_channels;
        for &features in &self.features {
            encoder.push(
                Conv2dConfig::new([in_channels, features], [3, 3])
                    .with_stride([2, 2])
                    .with_padding(PaddingConfig2d::Explicit(1, 1))
                    .init(device),
            );
            in_channels = features;
        }

        let mut decoder = Vec::with_capacity(self.features.len());
        for stage in (0..self.features.len()).rev() {
            let out_channels = if stage == 0 {
                self.in_channels
            } else {
                self.features[stage - 1]
            };
            decoder.push(
                ConvTranspose2dConfig::new([self.features[stage], out_channels], [3, 3])
                    .with_stride([2, 2])
                    .with_padding([1, 1])
                    .with_padding_out([1, 1])
                    .init(device),
            );
        }

        DenoisingAutoencoder { encoder, decoder }
    }
}

/// Reconstruction network: corrupted batch in, denoised batch out.
#[derive(Module, Debug)]
pub struct DenoisingAutoencoder<B: Backend> {
    encoder: Vec<Conv2d<B>>,
    decoder: Vec<ConvTranspose2d<B>>,
}

impl<B: Backend> DenoisingAutoencoder<B> {
    /// Reconstruct a `[batch, C, H, W]` input.
    pub fn forward(&self, batch: Tensor<B, 4>) -> Tensor<B, 4> {
        let mut x = batch;
        for conv in &self.encoder {
            x = relu(conv.forward(x));
        }
        let last = self.decoder.len() - 1;
        for (stage, deconv) in self.decoder.iter().enumerate() {
            x = deconv.forward(x);
            x = if stage == last { sigmoid(x) } else { relu(x) };
        }
        x
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::tensor::Distribution;
    use burn_ndarray::NdArray;

    type B = NdArray<f32>;

    #[test]
    fn test_forward_preserves_shape_for_divisible_input() {
        let device = Default::default();
        let model = DenoisingAutoencoderConfig::new(vec![8, 16]).init::<B>(&device);
        let batch = Tensor::<B, 4>::random([2, 3, 32, 32], Distribution::Uniform(0.0, 1.0), &device);
        let output = model.forward(batch);
        assert_eq!(output.dims(), [2, 3, 32, 32]);
    }

    #[test]
    fn test_output_stays_in_unit_range() {
        let device = Default::default();
        let model = DenoisingAutoencoderConfig::new(vec![4]).init::<B>(&device);
        let batch = Tensor::<B, 4>::random([1, 3, 8, 8], Distribution::Uniform(0.0, 1.0), &device);
        let output = model.forward(batch);
        for v in output.to_data().to_vec::<f32>().unwrap() {
            assert!((0.0..=1.0).contains(&v), "sigmoid output escaped: {}", v);
        }
    }

    #[test]
    fn test_single_channel_config() {
        let device = Default::default();
        let model = DenoisingAutoencoderConfig::new(vec![8])
            .with_in_channels(1)
            .init::<B>(&device);
        let batch = Tensor::<B, 4>::random([2, 1, 16, 16], Distribution::Uniform(0.0, 1.0), &device);
        assert_eq!(model.forward(batch).dims(), [2, 1, 16, 16]);
        assert!(model.num_params() > 0);
    }

    #[test]
    fn test_odd_input_changes_output_shape() {
        // Callers are expected to resample when this happens.
        let device = Default::default();
        let model = DenoisingAutoencoderConfig::new(vec![4]).init::<B>(&device);
        let batch = Tensor::<B, 4>::random([1, 3, 9, 9], Distribution::Uniform(0.0, 1.0), &device);
        let output = model.forward(batch);
        assert_eq!(output.dims(), [1, 3, 10, 10]);
    }
}
