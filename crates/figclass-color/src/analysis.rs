//! Color content analysis
//!
//! Provides tools for analyzing the color content of images:
//! - Quantized palette counting and palette diversity
//! - Mean HSV saturation
//! - Circular hue variance over chromatic pixels

use crate::colorspace::rgb_to_hsv;
use crate::{ColorError, ColorResult};
use figclass_core::RasterImage;
use std::collections::HashSet;

/// Default saturation below which a pixel is treated as achromatic
pub const DEFAULT_MIN_CHROMA_SATURATION: f64 = 0.1;

/// Default value (brightness) below which hue is ignored
pub const DEFAULT_MIN_CHROMA_VALUE: f64 = 0.1;

/// Statistics about the color content of an image
#[derive(Debug, Clone, PartialEq)]
pub struct ColorStats {
    /// Mean HSV saturation over all pixels (0.0-1.0)
    pub saturation_mean: f64,
    /// Circular hue variance over chromatic pixels (0.0-1.0),
    /// `None` when no pixel is chromatic
    pub hue_variance: Option<f64>,
    /// Fraction of pixels that passed the chroma floors
    pub chromatic_fraction: f64,
}

/// Count distinct colors after reducing each channel to `bits` bits.
///
/// # Errors
///
/// Returns [`ColorError::InvalidParameters`] unless `1 <= bits <= 8`.
pub fn count_quantized_colors(image: &RasterImage, bits: u8) -> ColorResult<usize> {
    if !(1..=8).contains(&bits) {
        return Err(ColorError::InvalidParameters(format!(
            "palette bits must be in 1..=8, got {bits}"
        )));
    }
    let shift = 8 - bits;
    let b = bits as u32;
    let mut seen: HashSet<u32> = HashSet::new();
    for [r, g, bl] in image.pixels() {
        let key = ((r >> shift) as u32) << (2 * b) | ((g >> shift) as u32) << b | (bl >> shift) as u32;
        seen.insert(key);
    }
    Ok(seen.len())
}

/// Distinct quantized colors divided by the total pixel count.
///
/// Flat renderings (line art, charts, scans of text) score close to 0;
/// continuous-tone content scores higher.
pub fn palette_diversity(image: &RasterImage, bits: u8) -> ColorResult<f64> {
    let count = count_quantized_colors(image, bits)?;
    Ok((count as f64 / image.pixel_count() as f64).clamp(0.0, 1.0))
}

/// Mean HSV saturation over all pixels.
///
/// Same as [`ColorStats::saturation_mean`] from [`color_content`].
pub fn saturation_mean(image: &RasterImage) -> f64 {
    color_content(image, DEFAULT_MIN_CHROMA_SATURATION, DEFAULT_MIN_CHROMA_VALUE).saturation_mean
}

/// Circular variance of hue over chromatic pixels.
///
/// Hue is an angle, so the statistic is `1 - R` where `R` is the length of
/// the mean unit vector `(cos h, sin h)`. Hues at 350 and 10 degrees are
/// close, not 340 apart. Returns `None` when no pixel passes the chroma
/// floors (hue is undefined for gray content).
pub fn hue_circular_variance(
    image: &RasterImage,
    min_saturation: f64,
    min_value: f64,
) -> Option<f64> {
    color_content(image, min_saturation, min_value).hue_variance
}

/// Analyze the saturation and hue content of an image in one pass.
pub fn color_content(image: &RasterImage, min_saturation: f64, min_value: f64) -> ColorStats {
    let mut sum_s = 0.0;
    let mut sum_cos = 0.0;
    let mut sum_sin = 0.0;
    let mut chromatic = 0usize;

    for [r, g, b] in image.pixels() {
        let hsv = rgb_to_hsv(r, g, b);
        sum_s += hsv.s;
        if hsv.is_chromatic(min_saturation, min_value) {
            let rad = hsv.h.to_radians();
            sum_cos += rad.cos();
            sum_sin += rad.sin();
            chromatic += 1;
        }
    }

    let total = image.pixel_count() as f64;
    let hue_variance = (chromatic > 0).then(|| {
        let resultant = (sum_cos * sum_cos + sum_sin * sum_sin).sqrt() / chromatic as f64;
        (1.0 - resultant).clamp(0.0, 1.0)
    });

    ColorStats {
        saturation_mean: (sum_s / total).clamp(0.0, 1.0),
        hue_variance,
        chromatic_fraction: chromatic as f64 / total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_color(width: u32, c1: [u8; 3], c2: [u8; 3]) -> RasterImage {
        RasterImage::from_fn(width, 1, |x, _| if x % 2 == 0 { c1 } else { c2 }).unwrap()
    }

    #[test]
    fn test_count_quantized_colors_merges_close_values() {
        // 0x10 and 0x1f share the same top nibble
        let img = two_color(4, [0x10, 0, 0], [0x1f, 0, 0]);
        assert_eq!(count_quantized_colors(&img, 4).unwrap(), 1);
        assert_eq!(count_quantized_colors(&img, 8).unwrap(), 2);
    }

    #[test]
    fn test_count_quantized_colors_bad_bits() {
        let img = RasterImage::filled(2, 2, [0, 0, 0]).unwrap();
        assert!(count_quantized_colors(&img, 0).is_err());
        assert!(count_quantized_colors(&img, 9).is_err());
    }

    #[test]
    fn test_palette_diversity_solid() {
        let img = RasterImage::filled(10, 10, [40, 80, 120]).unwrap();
        assert_eq!(palette_diversity(&img, 4).unwrap(), 0.01);
    }

    #[test]
    fn test_saturation_mean() {
        let img = two_color(2, [255, 0, 0], [128, 128, 128]);
        assert!((saturation_mean(&img) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_hue_variance_gray_is_none() {
        let img = two_color(4, [0, 0, 0], [200, 200, 200]);
        assert_eq!(hue_circular_variance(&img, 0.1, 0.1), None);
    }

    #[test]
    fn test_hue_variance_single_hue() {
        let img = two_color(4, [255, 0, 0], [128, 0, 0]);
        let var = hue_circular_variance(&img, 0.1, 0.1).unwrap();
        assert!(var < 1e-9);
    }

    #[test]
    fn test_hue_variance_wraparound() {
        // Hues near 350 and 10 degrees are close on the circle
        let img = two_color(4, [255, 0, 43], [255, 43, 0]);
        let var = hue_circular_variance(&img, 0.1, 0.1).unwrap();
        assert!(var < 0.05, "wraparound hues should be close, got {var}");
    }

    #[test]
    fn test_hue_variance_opposite_hues() {
        let img = two_color(4, [255, 0, 0], [0, 255, 255]);
        let var = hue_circular_variance(&img, 0.1, 0.1).unwrap();
        assert!((var - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_color_content_matches_single_functions() {
        let img = RasterImage::from_fn(8, 8, |x, y| [(x * 30) as u8, (y * 30) as u8, 90]).unwrap();
        let stats = color_content(&img, 0.1, 0.1);
        assert!((stats.saturation_mean - saturation_mean(&img)).abs() < 1e-12);
        assert_eq!(stats.hue_variance, hue_circular_variance(&img, 0.1, 0.1));
        assert!(stats.chromatic_fraction > 0.0);
    }
}
