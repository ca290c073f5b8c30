//! Error types for figclass-core
//!
//! Provides a unified error type for all operations in the core crate.
//! The image variants are the "invalid image" failures: they are returned
//! as soon as a buffer violates the raster invariants, never patched over.

use thiserror::Error;

/// figclass-core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid image dimensions (zero width or height, or overflowing size)
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Channel count other than 3 (RGB)
    #[error("invalid channel count: {0} (expected 3)")]
    InvalidChannelCount(u32),

    /// Pixel buffer length does not match width * height * channels
    #[error("pixel buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// Index out of bounds
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Image dimension mismatch between two planes
    #[error("dimension mismatch: expected {}x{}, got {}x{}", .expected.0, .expected.1, .actual.0, .actual.1)]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

impl Error {
    /// Whether this error reports a raster that breaks the image invariants.
    pub fn is_invalid_image(&self) -> bool {
        matches!(
            self,
            Error::InvalidDimension { .. }
                | Error::InvalidChannelCount(_)
                | Error::BufferSizeMismatch { .. }
        )
    }
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;
