pub mod error;
pub mod metric;
pub mod noise;
pub mod resize;

pub use error::{DenoiseError, Result};
pub use noise::{NoiseKind, NoiseSpec};
