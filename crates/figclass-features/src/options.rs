//! Extraction options

use crate::error::{FeatureError, FeatureResult};
use figclass_color::{DEFAULT_MIN_CHROMA_SATURATION, DEFAULT_MIN_CHROMA_VALUE};
use figclass_filter::{DEFAULT_MIN_LINE_FRACTION, DEFAULT_MIN_LINE_LENGTH, EdgeOptions};
use figclass_region::ContourOptions;

/// Default bits per channel for palette quantization
pub const DEFAULT_PALETTE_BITS: u8 = 4;

/// Default floor for the significant contour area, in pixels
pub const DEFAULT_MIN_CONTOUR_AREA: u32 = 24;

/// Default significant contour area as a fraction of the image
pub const DEFAULT_MIN_CONTOUR_FRACTION: f64 = 0.0005;

/// Default luminance stddev above which the background is not uniform
pub const DEFAULT_TEXT_BACKGROUND_MAX_STD: f64 = 0.12;

/// Options for feature extraction
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Bits per channel kept when counting palette colors (default: 4)
    pub palette_bits: u8,
    /// Edge threshold: stddev multiplier above the mean (default: 1.0)
    pub edge_k: f64,
    /// Edge threshold: minimum normalized gradient magnitude (default: 0.08)
    pub edge_floor: f64,
    /// Minimum straight run as a fraction of the shorter side (default: 0.1)
    pub min_line_fraction: f64,
    /// Minimum straight run in pixels (default: 12)
    pub min_line_length: u32,
    /// Minimum significant contour area in pixels (default: 24)
    pub min_contour_area: u32,
    /// Minimum significant contour area as an image fraction (default: 0.0005)
    pub min_contour_fraction: f64,
    /// Polygon tolerance as a fraction of the perimeter (default: 0.02)
    pub polygon_epsilon_fraction: f64,
    /// Minimum polygon tolerance in pixels (default: 1.0)
    pub polygon_min_epsilon: f64,
    /// Saturation below which hue is ignored (default: 0.1)
    pub min_chroma_saturation: f64,
    /// Value below which hue is ignored (default: 0.1)
    pub min_chroma_value: f64,
    /// Background luminance stddev above which no text is reported (default: 0.12)
    pub text_background_max_std: f64,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        let edge = EdgeOptions::default();
        let contour = ContourOptions::default();
        Self {
            palette_bits: DEFAULT_PALETTE_BITS,
            edge_k: edge.k,
            edge_floor: edge.floor,
            min_line_fraction: DEFAULT_MIN_LINE_FRACTION,
            min_line_length: DEFAULT_MIN_LINE_LENGTH,
            min_contour_area: DEFAULT_MIN_CONTOUR_AREA,
            min_contour_fraction: DEFAULT_MIN_CONTOUR_FRACTION,
            polygon_epsilon_fraction: contour.epsilon_fraction,
            polygon_min_epsilon: contour.min_epsilon,
            min_chroma_saturation: DEFAULT_MIN_CHROMA_SATURATION,
            min_chroma_value: DEFAULT_MIN_CHROMA_VALUE,
            text_background_max_std: DEFAULT_TEXT_BACKGROUND_MAX_STD,
        }
    }
}

impl ExtractOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the palette quantization depth
    pub fn with_palette_bits(mut self, bits: u8) -> Self {
        self.palette_bits = bits;
        self
    }

    /// Set the edge threshold parameters
    pub fn with_edge_threshold(mut self, k: f64, floor: f64) -> Self {
        self.edge_k = k;
        self.edge_floor = floor;
        self
    }

    /// Set the minimum straight run parameters
    pub fn with_min_line(mut self, fraction: f64, length: u32) -> Self {
        self.min_line_fraction = fraction;
        self.min_line_length = length;
        self
    }

    /// Set the minimum significant contour area
    pub fn with_min_contour_area(mut self, pixels: u32, fraction: f64) -> Self {
        self.min_contour_area = pixels;
        self.min_contour_fraction = fraction;
        self
    }

    /// Set the chroma floors used for hue statistics
    pub fn with_chroma_floor(mut self, saturation: f64, value: f64) -> Self {
        self.min_chroma_saturation = saturation;
        self.min_chroma_value = value;
        self
    }

    /// Set the background uniformity limit for text detection
    pub fn with_text_background_max_std(mut self, std: f64) -> Self {
        self.text_background_max_std = std;
        self
    }

    /// Edge map options derived from these options
    pub fn edge_options(&self) -> EdgeOptions {
        EdgeOptions::new()
            .with_k(self.edge_k)
            .with_floor(self.edge_floor)
    }

    /// Contour options for an image with `pixel_count` pixels
    pub fn contour_options(&self, pixel_count: usize) -> ContourOptions {
        let scaled = (pixel_count as f64 * self.min_contour_fraction).round() as u32;
        ContourOptions {
            min_area: self.min_contour_area.max(scaled),
            epsilon_fraction: self.polygon_epsilon_fraction,
            min_epsilon: self.polygon_min_epsilon,
            skip_border_touching: true,
        }
    }

    /// Validate options
    pub fn validate(&self) -> FeatureResult<()> {
        if !(1..=8).contains(&self.palette_bits) {
            return Err(FeatureError::InvalidParameters(format!(
                "palette_bits must be in 1..=8, got {}",
                self.palette_bits
            )));
        }
        self.edge_options().validate()?;
        if !(0.0..=1.0).contains(&self.min_line_fraction) {
            return Err(FeatureError::InvalidParameters(
                "min_line_fraction must be in [0, 1]".to_string(),
            ));
        }
        if self.min_line_length < 2 {
            return Err(FeatureError::InvalidParameters(
                "min_line_length must be at least 2".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.min_contour_fraction) {
            return Err(FeatureError::InvalidParameters(
                "min_contour_fraction must be in [0, 1]".to_string(),
            ));
        }
        self.contour_options(1).validate()?;
        let chroma = [self.min_chroma_saturation, self.min_chroma_value];
        if chroma.iter().any(|v| !(0.0..=1.0).contains(v)) {
            return Err(FeatureError::InvalidParameters(
                "chroma floors must be in [0, 1]".to_string(),
            ));
        }
        if !(self.text_background_max_std > 0.0 && self.text_background_max_std.is_finite()) {
            return Err(FeatureError::InvalidParameters(
                "text_background_max_std must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
