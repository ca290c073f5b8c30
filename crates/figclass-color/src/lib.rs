//! figclass Color - Color processing for figure analysis
//!
//! This crate provides color manipulation and analysis functions:
//!
//! - **Color space conversion** ([`colorspace`]): RGB -> luminance, RGB -> HSV
//! - **Color analysis** ([`analysis`]): palette diversity, saturation, hue variance
//! - **Thresholding** ([`threshold`]): Otsu's method, binarization

pub mod analysis;
pub mod colorspace;
pub mod error;
pub mod threshold;

// Re-export core types
pub use figclass_core;

// Re-export error types
pub use error::{ColorError, ColorResult};

// Re-export color space types and functions
pub use colorspace::{Hsv, rgb_to_hsv, rgb_to_luma};

// Re-export analysis functions
pub use analysis::{
    // Types
    ColorStats,
    // Constants
    DEFAULT_MIN_CHROMA_SATURATION,
    DEFAULT_MIN_CHROMA_VALUE,
    // Functions
    color_content,
    count_quantized_colors,
    hue_circular_variance,
    palette_diversity,
    saturation_mean,
};

// Re-export threshold functions
pub use threshold::{compute_otsu_threshold, luma_histogram, threshold_to_mask, to_level};
