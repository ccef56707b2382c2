//! Error types for the corruption and quality subsystem.
//!
//! Configuration problems are rejected when a pipeline is assembled, never
//! mid-batch; shape problems surface on the specific metric call that hit
//! them. A zero mean-squared error is not an error at all: PSNR reports it
//! as positive infinity by contract.

use thiserror::Error;

/// Main error type for noise synthesis and quality scoring.
#[derive(Error, Debug)]
pub enum DenoiseError {
    /// Invalid configuration, rejected at construction time.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Two batches that must agree in shape do not.
    #[error("Shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },
}

/// Result type for denoising operations.
pub type Result<T> = std::result::Result<T, DenoiseError>;

impl DenoiseError {
    /// Create an invalid configuration error.
    pub fn invalid_configuration(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }
}
