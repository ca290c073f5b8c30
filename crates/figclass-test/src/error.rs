//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur during regression testing
#[derive(Debug, Error)]
pub enum TestError {
    /// Failed to build a synthetic figure
    #[error("failed to build fixture '{name}': {source}")]
    Fixture {
        name: String,
        #[source]
        source: figclass_core::Error,
    },
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
