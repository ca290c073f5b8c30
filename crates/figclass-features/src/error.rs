//! Error types for figclass-features

use crate::schema::FeatureName;
use thiserror::Error;

/// Errors that can occur during feature extraction
#[derive(Debug, Error)]
pub enum FeatureError {
    /// Core library error (invalid image)
    #[error("core error: {0}")]
    Core(#[from] figclass_core::Error),

    /// Color analysis error
    #[error("color error: {0}")]
    Color(#[from] figclass_color::ColorError),

    /// Filter error
    #[error("filter error: {0}")]
    Filter(#[from] figclass_filter::FilterError),

    /// Region analysis error
    #[error("region error: {0}")]
    Region(#[from] figclass_region::RegionError),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// A feature value is NaN or infinite
    #[error("feature {feature} is not finite: {value}")]
    NonFinite { feature: FeatureName, value: f64 },
}

impl FeatureError {
    /// Whether the error was caused by the input image rather than by options
    pub fn is_invalid_image(&self) -> bool {
        match self {
            FeatureError::Core(e) => e.is_invalid_image(),
            FeatureError::Color(figclass_color::ColorError::Core(e))
            | FeatureError::Filter(figclass_filter::FilterError::Core(e))
            | FeatureError::Region(figclass_region::RegionError::Core(e)) => e.is_invalid_image(),
            _ => false,
        }
    }
}

/// Result type for feature operations
pub type FeatureResult<T> = Result<T, FeatureError>;
