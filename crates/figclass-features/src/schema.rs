//! Feature schema and feature vectors
//!
//! The schema is fixed: twelve named features, always present, always
//! finite. [`FeatureName::ALL`] lists them in storage order.

use crate::error::{FeatureError, FeatureResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of features in the schema
pub const FEATURE_COUNT: usize = 12;

/// Name of one feature in the fixed schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureName {
    /// width / height
    AspectRatio,
    /// Mean luminance in [0, 1]
    Brightness,
    /// Luminance standard deviation, normalized to [0, 1]
    Contrast,
    /// Fraction of edge pixels
    EdgeDensity,
    /// Distinct quantized colors per pixel
    ColorDiversity,
    /// Fraction of the image covered by glyph-like strokes
    TextRatio,
    /// Fraction of pixels on long straight edge runs
    LineDensity,
    /// Mean circularity of significant contours
    CircleScore,
    /// Fraction of contours approximated by four-corner polygons
    RectScore,
    /// Similarity with the horizontal mirror image
    Symmetry,
    /// Mean HSV saturation
    SaturationMean,
    /// Circular variance of hue
    HueVariance,
}

impl FeatureName {
    /// All features in schema order
    pub const ALL: [FeatureName; FEATURE_COUNT] = [
        FeatureName::AspectRatio,
        FeatureName::Brightness,
        FeatureName::Contrast,
        FeatureName::EdgeDensity,
        FeatureName::ColorDiversity,
        FeatureName::TextRatio,
        FeatureName::LineDensity,
        FeatureName::CircleScore,
        FeatureName::RectScore,
        FeatureName::Symmetry,
        FeatureName::SaturationMean,
        FeatureName::HueVariance,
    ];

    /// Position of this feature in [`FeatureName::ALL`]
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Stable snake_case key
    pub fn key(self) -> &'static str {
        match self {
            FeatureName::AspectRatio => "aspect_ratio",
            FeatureName::Brightness => "brightness",
            FeatureName::Contrast => "contrast",
            FeatureName::EdgeDensity => "edge_density",
            FeatureName::ColorDiversity => "color_diversity",
            FeatureName::TextRatio => "text_ratio",
            FeatureName::LineDensity => "line_density",
            FeatureName::CircleScore => "circle_score",
            FeatureName::RectScore => "rect_score",
            FeatureName::Symmetry => "symmetry",
            FeatureName::SaturationMean => "saturation_mean",
            FeatureName::HueVariance => "hue_variance",
        }
    }

    /// Whether the feature is bounded to [0, 1]
    ///
    /// Only `aspect_ratio` is unbounded (any positive value).
    pub fn is_unit_interval(self) -> bool {
        self != FeatureName::AspectRatio
    }
}

impl fmt::Display for FeatureName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for FeatureName {
    type Err = FeatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FeatureName::ALL
            .into_iter()
            .find(|n| n.key() == s)
            .ok_or_else(|| FeatureError::InvalidParameters(format!("unknown feature: {s}")))
    }
}

/// Pixel size of the figure as reported by the extraction layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeHint {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl SizeHint {
    /// Create a new size hint
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Longer side in pixels
    pub fn max_side(&self) -> u32 {
        self.width.max(self.height)
    }
}

/// Fixed-schema numeric description of one image
///
/// Every schema key is present and every value is finite. The optional
/// size hint carries the absolute figure size, which the ratio-only
/// features cannot express.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    values: [f64; FEATURE_COUNT],
    size: Option<SizeHint>,
}

impl FeatureVector {
    /// Build a vector from values in [`FeatureName::ALL`] order.
    ///
    /// # Errors
    ///
    /// Returns [`FeatureError::NonFinite`] for NaN or infinite values.
    pub fn from_values(values: [f64; FEATURE_COUNT]) -> FeatureResult<Self> {
        for (name, &value) in FeatureName::ALL.iter().zip(values.iter()) {
            if !value.is_finite() {
                return Err(FeatureError::NonFinite {
                    feature: *name,
                    value,
                });
            }
        }
        Ok(Self { values, size: None })
    }

    /// Build a vector from named values; unnamed features are 0.0.
    pub fn from_pairs(pairs: &[(FeatureName, f64)]) -> FeatureResult<Self> {
        let mut values = [0.0; FEATURE_COUNT];
        for &(name, value) in pairs {
            values[name.index()] = value;
        }
        Self::from_values(values)
    }

    /// Attach the absolute figure size.
    pub fn with_size_hint(mut self, hint: SizeHint) -> Self {
        self.size = Some(hint);
        self
    }

    /// Absolute figure size, if known
    pub fn size_hint(&self) -> Option<SizeHint> {
        self.size
    }

    /// Value of one feature
    #[inline]
    pub fn get(&self, name: FeatureName) -> f64 {
        self.values[name.index()]
    }

    /// Raw values in schema order
    pub fn values(&self) -> &[f64; FEATURE_COUNT] {
        &self.values
    }

    /// Iterate over (name, value) pairs in schema order
    pub fn iter(&self) -> impl Iterator<Item = (FeatureName, f64)> + '_ {
        FeatureName::ALL.iter().map(|&n| (n, self.values[n.index()]))
    }
}

impl fmt::Display for FeatureVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (name, value) in self.iter() {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{name}={value:.4}")?;
            first = false;
        }
        Ok(())
    }
}
