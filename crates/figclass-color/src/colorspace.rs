//! Color space conversion
//!
//! - RGB -> luminance (BT.601)
//! - RGB -> HSV (hue in degrees, saturation and value in [0, 1])

pub use figclass_core::color::luma as rgb_to_luma;

/// HSV color representation
///
/// - `h`: Hue in degrees, [0.0, 360.0); 0.0 when the color is achromatic
/// - `s`: Saturation in range [0.0, 1.0]
/// - `v`: Value in range [0.0, 1.0]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

impl Hsv {
    /// Create a new HSV color
    pub fn new(h: f64, s: f64, v: f64) -> Self {
        Self { h, s, v }
    }

    /// Whether hue carries information for this color.
    ///
    /// Hue is undefined at zero saturation and unstable near black, so
    /// both floors must be exceeded.
    #[inline]
    pub fn is_chromatic(&self, min_saturation: f64, min_value: f64) -> bool {
        self.s > min_saturation && self.v > min_value
    }
}

/// Convert RGB values to HSV
///
/// Hue correspondence: 0 red, 60 yellow, 120 green, 180 cyan,
/// 240 blue, 300 magenta.
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> Hsv {
    let ri = r as f64 / 255.0;
    let gi = g as f64 / 255.0;
    let bi = b as f64 / 255.0;

    let max = ri.max(gi).max(bi);
    let min = ri.min(gi).min(bi);
    let delta = max - min;

    let v = max;
    if delta <= 0.0 || max <= 0.0 {
        return Hsv::new(0.0, 0.0, v);
    }
    let s = delta / max;

    let sector = if ri == max {
        (gi - bi) / delta
    } else if gi == max {
        2.0 + (bi - ri) / delta
    } else {
        4.0 + (ri - gi) / delta
    };

    let mut h = sector * 60.0;
    if h < 0.0 {
        h += 360.0;
    }
    if h >= 360.0 {
        h -= 360.0;
    }

    Hsv::new(h, s, v)
}
