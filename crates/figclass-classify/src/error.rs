//! Error types for figclass-classify

use thiserror::Error;

/// Errors that can occur during classification
#[derive(Debug, Error)]
pub enum ClassifyError {
    /// Core library error (invalid image)
    #[error("core error: {0}")]
    Core(#[from] figclass_core::Error),

    /// Feature extraction error
    #[error("feature error: {0}")]
    Feature(#[from] figclass_features::FeatureError),

    /// Rule table or model could not be parsed
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Rule table violates its invariants
    #[error("invalid rule table: {0}")]
    InvalidRuleTable(String),

    /// Linear model violates its invariants
    #[error("invalid model: {0}")]
    InvalidModel(String),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

impl ClassifyError {
    /// Whether the error was caused by the input image
    pub fn is_invalid_image(&self) -> bool {
        match self {
            ClassifyError::Core(e) => e.is_invalid_image(),
            ClassifyError::Feature(e) => e.is_invalid_image(),
            _ => false,
        }
    }
}

/// Result type for classification operations
pub type ClassifyResult<T> = Result<T, ClassifyError>;
