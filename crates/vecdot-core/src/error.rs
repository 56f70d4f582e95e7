//! Error types for vecdot-core.

use thiserror::Error;

use crate::simd_native::SimdLevel;

/// Benchmark error types.
#[derive(Error, Debug)]
pub enum Error {
    /// A configuration value is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The sampling interval for input generation is empty or not finite.
    #[error("Invalid value range: [{low}, {high})")]
    InvalidRange {
        /// Inclusive lower bound.
        low: f32,
        /// Exclusive upper bound.
        high: f32,
    },

    /// A kernel was forced that this CPU cannot execute.
    #[error("Kernel not supported on this CPU: {0}")]
    UnsupportedKernel(SimdLevel),

    /// Configuration sources could not be read or merged.
    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

/// Result type alias for benchmark operations.
pub type Result<T> = std::result::Result<T, Error>;
