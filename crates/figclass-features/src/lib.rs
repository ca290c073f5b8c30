//! figclass-features - Feature extraction for raster figures
//!
//! Turns one decoded [`RasterImage`](figclass_core::RasterImage) into a
//! [`FeatureVector`]: twelve named, finite values describing tone, edges,
//! palette, strokes, shapes, symmetry and color.
//!
//! Extraction is a pure function of the image and the options. Inputs for
//! which a feature is undefined (solid fills, gray images) produce neutral
//! values plus [`DegenerateFeatureWarning`]s instead of errors.
//!
//! # Example
//!
//! ```
//! use figclass_core::RasterImage;
//! use figclass_features::{ExtractOptions, FeatureName, extract_features_with_diagnostics};
//!
//! let img = RasterImage::filled(64, 64, [255, 255, 255]).unwrap();
//! let ex = extract_features_with_diagnostics(&img, &ExtractOptions::default()).unwrap();
//! assert_eq!(ex.features.get(FeatureName::EdgeDensity), 0.0);
//! assert!(ex.is_degenerate());
//! ```

pub mod diagnostics;
mod error;
pub mod extract;
pub mod options;
pub mod schema;
pub mod text;

pub use error::{FeatureError, FeatureResult};

// Types
pub use diagnostics::{DegenerateFeatureWarning, DegenerateReason, NeutralValue};
pub use extract::Extraction;
pub use options::ExtractOptions;
pub use schema::{FEATURE_COUNT, FeatureName, FeatureVector, SizeHint};
pub use text::GlyphStats;

// Functions
pub use extract::{
    contrast, extract_features, extract_features_with_diagnostics, extract_features_with_options,
    symmetry,
};
pub use text::{glyph_stats, minority_foreground};
