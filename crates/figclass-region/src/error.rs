//! Error types for figclass-region

use thiserror::Error;

/// Errors that can occur during region processing operations
#[derive(Debug, Error)]
pub enum RegionError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] figclass_core::Error),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// Border tracing did not close
    #[error("border tracing failed for component {label}: {reason}")]
    TraceFailed { label: u32, reason: String },
}

/// Result type for region operations
pub type RegionResult<T> = Result<T, RegionError>;
