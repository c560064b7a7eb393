//! Error types for the Vexil simulation.
//!
//! The per-tick path never fails; these errors only surface at
//! construction and configuration boundaries.

use thiserror::Error;

/// Unified error type for the Vexil simulation.
#[derive(Debug, Error)]
pub enum VexilError {
    /// Grid or layout dimensions are unusable.
    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A runtime parameter name was not recognized.
    #[error("Unknown parameter: {0}")]
    UnknownParameter(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias for `Result<T, VexilError>`.
pub type VexilResult<T> = Result<T, VexilError>;
