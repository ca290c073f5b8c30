//! Glyph-like stroke detection
//!
//! Text on a scanned page binarizes into many small, thin components on a
//! flat background. A component counts as glyph-like when it is small in
//! both directions and most of its pixels touch the background (strokes,
//! not blobs). The text ratio is the area of glyph bounding boxes over the
//! image area.

use crate::diagnostics::DegenerateReason;
use crate::error::FeatureResult;
use figclass_core::{BinaryMask, LumaPlane};
use figclass_region::{ConnectedComponent, ConnectivityType, LabelMap, find_connected_components};

/// Components smaller than this are noise
const GLYPH_MIN_AREA: u32 = 3;

/// Glyph bounding boxes may always be this large
const GLYPH_MAX_SIDE_FLOOR: i32 = 8;

/// Glyph bounding boxes may be this fraction of the shorter image side
const GLYPH_MAX_SIDE_FRACTION: f64 = 0.2;

/// Minimum share of pixels with a background 4-neighbor
const GLYPH_MIN_BOUNDARY_RATIO: f64 = 0.5;

/// Glyph statistics of a binarized image
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphStats {
    /// Number of glyph-like components
    pub glyph_count: usize,
    /// Summed bounding-box area of glyph-like components
    pub glyph_area: u64,
    /// `glyph_area / pixel_count`, clamped to [0, 1]
    pub text_ratio: f64,
}

/// Pick the minority class of a binarization as foreground.
pub fn minority_foreground(dark: BinaryMask) -> BinaryMask {
    let total = dark.as_slice().len();
    if dark.count() * 2 <= total {
        dark
    } else {
        dark.invert()
    }
}

/// Population stddev of luminance over background (non-foreground) pixels.
pub fn background_std(plane: &LumaPlane, foreground: &BinaryMask) -> f64 {
    let (mut n, mut sum, mut sum_sq) = (0usize, 0.0f64, 0.0f64);
    for (&v, &fg) in plane.values().iter().zip(foreground.as_slice()) {
        if !fg {
            n += 1;
            sum += v;
            sum_sq += v * v;
        }
    }
    if n == 0 {
        return 0.0;
    }
    let mean = sum / n as f64;
    (sum_sq / n as f64 - mean * mean).max(0.0).sqrt()
}

fn boundary_ratio(labels: &LabelMap, comp: &ConnectedComponent) -> f64 {
    let b = comp.bounds;
    let mut boundary = 0u32;
    for y in b.y as i64..(b.y + b.h) as i64 {
        for x in b.x as i64..(b.x + b.w) as i64 {
            if labels.get(x, y) != comp.label {
                continue;
            }
            let exposed = [(-1, 0), (1, 0), (0, -1), (0, 1)]
                .iter()
                .any(|&(dx, dy)| labels.get(x + dx, y + dy) != comp.label);
            if exposed {
                boundary += 1;
            }
        }
    }
    boundary as f64 / comp.pixel_count.max(1) as f64
}

/// Measure glyph-like components of a foreground mask.
pub fn glyph_stats(foreground: &BinaryMask) -> FeatureResult<GlyphStats> {
    let (w, h) = foreground.dimensions();
    let max_side = ((w.min(h) as f64 * GLYPH_MAX_SIDE_FRACTION) as i32).max(GLYPH_MAX_SIDE_FLOOR);
    let (labels, comps) = find_connected_components(foreground, ConnectivityType::EightWay)?;

    let mut glyph_count = 0usize;
    let mut glyph_area = 0u64;
    for comp in &comps {
        if comp.pixel_count < GLYPH_MIN_AREA || comp.bounds.w > max_side || comp.bounds.h > max_side {
            continue;
        }
        if boundary_ratio(&labels, comp) >= GLYPH_MIN_BOUNDARY_RATIO {
            glyph_count += 1;
            glyph_area += comp.bounds.area() as u64;
        }
    }

    let total = w as f64 * h as f64;
    Ok(GlyphStats {
        glyph_count,
        glyph_area,
        text_ratio: (glyph_area as f64 / total).clamp(0.0, 1.0),
    })
}

/// Text ratio of an image, given its luminance and minority-class mask.
///
/// Returns 0.0 with a reason when the background is too textured for the
/// stroke model to apply.
pub fn text_ratio(
    plane: &LumaPlane,
    foreground: &BinaryMask,
    max_background_std: f64,
) -> FeatureResult<(f64, Option<DegenerateReason>)> {
    if background_std(plane, foreground) > max_background_std {
        return Ok((0.0, Some(DegenerateReason::NonUniformBackground)));
    }
    let stats = glyph_stats(foreground)?;
    Ok((stats.text_ratio, None))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minority_foreground() {
        let mostly_dark = BinaryMask::from_fn(4, 4, |x, _| x > 0).unwrap();
        let fg = minority_foreground(mostly_dark);
        assert_eq!(fg.count(), 4);
    }

    #[test]
    fn test_glyph_like_strokes() {
        // Two 3x5 "C" shapes: thin, small
        let mask = BinaryMask::from_fn(20, 10, |x, y| {
            let in_glyph = |ox: u32| {
                x >= ox && x < ox + 3 && (2..7).contains(&y) && (x == ox || y == 2 || y == 6)
            };
            in_glyph(2) || in_glyph(10)
        })
        .unwrap();
        let stats = glyph_stats(&mask).unwrap();
        assert_eq!(stats.glyph_count, 2);
        assert_eq!(stats.glyph_area, 30);
        assert!((stats.text_ratio - 30.0 / 200.0).abs() < 1e-12);
    }

    #[test]
    fn test_solid_block_is_not_glyph() {
        // 8x8 filled square: small, but only the rim touches background
        let mask = BinaryMask::from_fn(40, 40, |x, y| (10..18).contains(&x) && (10..18).contains(&y)).unwrap();
        let stats = glyph_stats(&mask).unwrap();
        assert_eq!(stats.glyph_count, 0);
    }

    #[test]
    fn test_large_component_is_not_glyph() {
        let mask = BinaryMask::from_fn(100, 100, |x, y| y == 50 && x > 10 && x < 90).unwrap();
        assert_eq!(glyph_stats(&mask).unwrap().glyph_count, 0);
    }

    #[test]
    fn test_textured_background_rejected() {
        let plane = LumaPlane::new(4, 1, vec![0.0, 1.0, 0.0, 1.0]).unwrap();
        let fg = BinaryMask::new(4, 1).unwrap();
        let (ratio, reason) = text_ratio(&plane, &fg, 0.12).unwrap();
        assert_eq!(ratio, 0.0);
        assert_eq!(reason, Some(DegenerateReason::NonUniformBackground));
    }
}
