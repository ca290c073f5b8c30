//! Degenerate-feature diagnostics
//!
//! Some features are undefined for some inputs (hue of a gray image,
//! contrast of a solid fill). Extraction then stores the neutral value and
//! records a [`DegenerateFeatureWarning`]; it never fails for these cases.

use crate::schema::FeatureName;
use std::fmt;

/// Why a feature fell back to its neutral value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DegenerateReason {
    /// Every pixel has the same color
    UniformImage,
    /// Luminance has a single gray level, so no binarization exists
    SingleGrayLevel,
    /// No pixel passed the chroma floors; hue is undefined
    NoChromaticPixels,
    /// No contour was large enough to be significant
    NoSignificantContours,
    /// The background is too textured for stroke detection
    NonUniformBackground,
}

impl DegenerateReason {
    /// Short human-readable description
    pub fn description(self) -> &'static str {
        match self {
            DegenerateReason::UniformImage => "image is a single solid color",
            DegenerateReason::SingleGrayLevel => "luminance has a single gray level",
            DegenerateReason::NoChromaticPixels => "no chromatic pixels, hue undefined",
            DegenerateReason::NoSignificantContours => "no significant contours",
            DegenerateReason::NonUniformBackground => "background is not uniform",
        }
    }
}

/// A feature that was set to its neutral value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DegenerateFeatureWarning {
    /// The affected feature
    pub feature: FeatureName,
    /// The value that was stored
    pub neutral_value: NeutralValue,
    /// Why the feature was undefined
    pub reason: DegenerateReason,
}

/// Neutral values used for undefined features
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NeutralValue {
    /// 0.0
    Zero,
    /// 1.0 (symmetry of a uniform image)
    One,
}

impl NeutralValue {
    /// The stored number
    pub fn value(self) -> f64 {
        match self {
            NeutralValue::Zero => 0.0,
            NeutralValue::One => 1.0,
        }
    }
}

impl DegenerateFeatureWarning {
    pub(crate) fn new(feature: FeatureName, neutral_value: NeutralValue, reason: DegenerateReason) -> Self {
        Self {
            feature,
            neutral_value,
            reason,
        }
    }
}

impl fmt::Display for DegenerateFeatureWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} defaulted to {} ({})",
            self.feature,
            self.neutral_value.value(),
            self.reason.description()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_display() {
        let w = DegenerateFeatureWarning::new(
            FeatureName::HueVariance,
            NeutralValue::Zero,
            DegenerateReason::NoChromaticPixels,
        );
        assert_eq!(
            w.to_string(),
            "hue_variance defaulted to 0 (no chromatic pixels, hue undefined)"
        );
    }
}
