//! figclass-region - Region analysis for figure classification
//!
//! This crate provides:
//!
//! - Connected component labeling (4- and 8-way)
//! - Outer border tracing and chain codes
//! - Contour shape descriptors (circularity, polygon approximation)

pub mod ccbord;
pub mod conncomp;
mod error;
pub mod shape;

pub use error::{RegionError, RegionResult};

// Types
pub use ccbord::{Border, BorderPoint, Direction};
pub use conncomp::{ConnectedComponent, ConnectivityType, LabelMap};
pub use shape::{CURVED_MIN_VERTICES, ContourOptions, ContourShape};

// Functions
pub use ccbord::{chain_length, to_chain_code, trace_outer_border};
pub use conncomp::{components_from_labels, find_connected_components, label_components};
pub use shape::{approximate_polygon, circularity, describe_border, analyze_contours};
