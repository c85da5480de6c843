//! Error types for the Mekon toolkit
//!
//! This module provides error handling using thiserror for structured
//! error definitions and anyhow for error propagation in command glue.

use crate::probe::ProbeError;
use thiserror::Error;

/// Main error type for Mekon operations
#[derive(Error, Debug)]
pub enum MekonError {
    /// Configuration could not be assembled
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// External command could not be run to completion
    #[error("Probe failed: {0}")]
    Probe(#[from] ProbeError),

    /// Data file exists but could not be interpreted
    #[error("Malformed data in {path}: {reason}")]
    MalformedData { path: String, reason: String },

    /// Invalid user input (unknown period, bad flag value)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

/// Result type alias for Mekon operations
pub type Result<T> = std::result::Result<T, MekonError>;

/// Convert anyhow::Error to MekonError
impl From<anyhow::Error> for MekonError {
    fn from(err: anyhow::Error) -> Self {
        MekonError::Other(err.to_string())
    }
}
