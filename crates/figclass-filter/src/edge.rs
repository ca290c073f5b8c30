//! Edge detection
//!
//! - [`sobel_magnitude`]: 3x3 Sobel gradient magnitude on a luminance plane
//! - [`edge_map`]: binary edge map with a threshold derived from the image's
//!   own gradient distribution (`mean + k * stddev`, never below a floor)

use crate::{FilterError, FilterResult};
use figclass_core::{BinaryMask, LumaPlane};

/// Largest Sobel response on a [0, 1] plane: |gx| = |gy| = 4.
const MAX_SOBEL_RESPONSE: f64 = 4.0 * std::f64::consts::SQRT_2;

/// Gradient magnitude field, normalized to [0, 1].
#[derive(Debug, Clone)]
pub struct GradientField {
    width: u32,
    height: u32,
    magnitude: Vec<f64>,
}

impl GradientField {
    /// Get the width
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the height
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Magnitudes in row-major order
    pub fn values(&self) -> &[f64] {
        &self.magnitude
    }

    /// (mean, population stddev) of the magnitudes
    pub fn mean_std(&self) -> (f64, f64) {
        let n = self.magnitude.len() as f64;
        let mean = self.magnitude.iter().sum::<f64>() / n;
        let var = self
            .magnitude
            .iter()
            .map(|m| (m - mean) * (m - mean))
            .sum::<f64>()
            / n;
        (mean, var.max(0.0).sqrt())
    }
}

/// Options for edge map construction
#[derive(Debug, Clone)]
pub struct EdgeOptions {
    /// Multiplier on the gradient stddev above the mean (default: 1.0)
    pub k: f64,
    /// Minimum normalized magnitude for an edge pixel (default: 0.08)
    pub floor: f64,
}

impl Default for EdgeOptions {
    fn default() -> Self {
        Self { k: 1.0, floor: 0.08 }
    }
}

impl EdgeOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the stddev multiplier
    pub fn with_k(mut self, k: f64) -> Self {
        self.k = k;
        self
    }

    /// Set the magnitude floor
    pub fn with_floor(mut self, floor: f64) -> Self {
        self.floor = floor;
        self
    }

    /// Validate options
    pub fn validate(&self) -> FilterResult<()> {
        if !self.k.is_finite() || self.k < 0.0 {
            return Err(FilterError::InvalidParameters(
                "edge k must be finite and non-negative".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&self.floor) {
            return Err(FilterError::InvalidParameters(
                "edge floor must be in [0, 1)".to_string(),
            ));
        }
        Ok(())
    }
}

/// Binary edge map plus the threshold that produced it
#[derive(Debug, Clone)]
pub struct EdgeMap {
    /// Edge pixels
    pub mask: BinaryMask,
    /// Normalized magnitude threshold that was applied
    pub threshold: f64,
}

impl EdgeMap {
    /// Fraction of pixels that are edge pixels
    pub fn density(&self) -> f64 {
        self.mask.coverage()
    }
}

/// Apply the 3x3 Sobel operator and return the normalized magnitude.
///
/// Borders are handled by replicating the outermost row/column, so a
/// uniform plane yields an all-zero field.
pub fn sobel_magnitude(plane: &LumaPlane) -> GradientField {
    let w = plane.width();
    let h = plane.height();
    let mut magnitude = Vec::with_capacity(w as usize * h as usize);

    for y in 0..h as i64 {
        for x in 0..w as i64 {
            let p = |dx: i64, dy: i64| plane.get_clamped(x + dx, y + dy);
            let gx = (p(1, -1) + 2.0 * p(1, 0) + p(1, 1)) - (p(-1, -1) + 2.0 * p(-1, 0) + p(-1, 1));
            let gy = (p(-1, 1) + 2.0 * p(0, 1) + p(1, 1)) - (p(-1, -1) + 2.0 * p(0, -1) + p(1, -1));
            let m = (gx * gx + gy * gy).sqrt() / MAX_SOBEL_RESPONSE;
            magnitude.push(m.clamp(0.0, 1.0));
        }
    }

    GradientField {
        width: w,
        height: h,
        magnitude,
    }
}

/// Build an edge map from a luminance plane.
///
/// A pixel is an edge pixel when its normalized gradient magnitude is
/// strictly greater than `max(mean + k * stddev, floor)`.
pub fn edge_map(plane: &LumaPlane, options: &EdgeOptions) -> FilterResult<EdgeMap> {
    options.validate()?;
    let field = sobel_magnitude(plane);
    edge_map_from_gradient(&field, options)
}

/// Threshold an already computed gradient field.
pub fn edge_map_from_gradient(field: &GradientField, options: &EdgeOptions) -> FilterResult<EdgeMap> {
    options.validate()?;
    let (mean, std) = field.mean_std();
    let threshold = (mean + options.k * std).max(options.floor);
    let w = field.width;
    let mask = BinaryMask::from_fn(w, field.height, |x, y| {
        field.magnitude[y as usize * w as usize + x as usize] > threshold
    })?;
    Ok(EdgeMap { mask, threshold })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step_plane(w: u32, h: u32, step_x: u32) -> LumaPlane {
        let data = (0..h)
            .flat_map(|_| (0..w).map(move |x| if x < step_x { 0.0 } else { 1.0 }))
            .collect();
        LumaPlane::new(w, h, data).unwrap()
    }

    #[test]
    fn test_sobel_uniform_is_zero() {
        let plane = LumaPlane::new(5, 5, vec![0.3; 25]).unwrap();
        let field = sobel_magnitude(&plane);
        assert!(field.values().iter().all(|&m| m == 0.0));
    }

    #[test]
    fn test_sobel_step_response() {
        let plane = step_plane(10, 4, 5);
        let field = sobel_magnitude(&plane);
        // Columns 4 and 5 straddle the step: gx = 4 -> 4 / (4 * sqrt 2)
        let m = field.values()[4];
        assert!((m - 1.0 / std::f64::consts::SQRT_2).abs() < 1e-9);
        assert_eq!(field.values()[0], 0.0);
    }

    #[test]
    fn test_edge_map_step() {
        let plane = step_plane(20, 10, 10);
        let edges = edge_map(&plane, &EdgeOptions::default()).unwrap();
        for y in 0..10 {
            assert!(edges.mask.get(9, y));
            assert!(edges.mask.get(10, y));
            assert!(!edges.mask.get(3, y));
        }
        assert!((edges.density() - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_edge_map_uniform_has_no_edges() {
        let plane = LumaPlane::new(8, 8, vec![0.7; 64]).unwrap();
        let edges = edge_map(&plane, &EdgeOptions::default()).unwrap();
        assert_eq!(edges.mask.count(), 0);
        assert_eq!(edges.threshold, 0.08);
    }

    #[test]
    fn test_edge_options_validate() {
        assert!(EdgeOptions::new().with_k(-1.0).validate().is_err());
        assert!(EdgeOptions::new().with_floor(1.5).validate().is_err());
        assert!(EdgeOptions::new().validate().is_ok());
    }
}
