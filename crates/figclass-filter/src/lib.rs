//! figclass-filter - Gradient and line filters
//!
//! This crate provides the filtering operations used by feature extraction:
//!
//! - Sobel gradient magnitude
//! - Edge maps with an adaptive, image-derived threshold
//! - Straight-line run detection over edge maps

pub mod edge;
mod error;
pub mod lines;

pub use error::{FilterError, FilterResult};

// Re-export commonly used functions
pub use edge::{EdgeMap, EdgeOptions, GradientField, edge_map, edge_map_from_gradient, sobel_magnitude};
pub use lines::{
    DEFAULT_MIN_LINE_FRACTION, DEFAULT_MIN_LINE_LENGTH, LineDirection, LineRuns, detect_line_runs,
    min_line_length,
};
