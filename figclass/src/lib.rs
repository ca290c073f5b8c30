//! figclass - Figure classification for document images
//!
//! Assigns each raster figure extracted from a document a semantic
//! category (photograph, diagram, chart, table, text block, icon) with a
//! confidence score.
//!
//! # Overview
//!
//! Classification runs in two deterministic stages:
//!
//! - Feature extraction: twelve named statistics of one decoded RGB image
//!   (tone, edges, palette, strokes, contour shapes, symmetry, color)
//! - Rule-based classification: an ordered, serializable rule table maps
//!   the feature vector to a category; a fitted linear model can replace
//!   the table behind the same interface
//!
//! The building blocks (color statistics, edge and line detection,
//! connected components and contour shapes) are exposed as modules.
//!
//! # Example
//!
//! ```
//! use figclass::RasterImage;
//! use figclass::classify::{Category, Pipeline};
//!
//! // A flat white figure carries no evidence for any category
//! let img = RasterImage::filled(64, 64, [255, 255, 255]).unwrap();
//! let result = Pipeline::with_default_rules().classify(&img).unwrap();
//! assert_eq!(result.category, Category::Unknown);
//! assert_eq!(result.matched_rule, "default");
//! ```

// Re-export core types (primary data structures used everywhere)
pub use figclass_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use figclass_classify as classify;
pub use figclass_color as color;
pub use figclass_features as features;
pub use figclass_filter as filter;
pub use figclass_region as region;
