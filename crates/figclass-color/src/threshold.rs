//! Global thresholding
//!
//! Otsu's method over the 8-bit luminance histogram, and conversion of a
//! luminance plane to a binary mask.

use figclass_core::{BinaryMask, LumaPlane};

use crate::ColorResult;

/// 256-bin histogram of a luminance plane quantized to 8 bits.
pub fn luma_histogram(plane: &LumaPlane) -> [u32; 256] {
    let mut hist = [0u32; 256];
    for &v in plane.values() {
        hist[to_level(v) as usize] += 1;
    }
    hist
}

/// Compute Otsu's threshold on a luminance plane.
///
/// Returns the gray level `t` (0..=255) maximizing the between-class
/// variance, where the dark class is `level <= t`. Returns `None` when the
/// plane has a single gray level and no split exists.
pub fn compute_otsu_threshold(plane: &LumaPlane) -> Option<u8> {
    let hist = luma_histogram(plane);
    let total: u64 = hist.iter().map(|&c| c as u64).sum();
    let occupied = hist.iter().filter(|&&c| c > 0).count();
    if occupied < 2 {
        return None;
    }

    let sum_all: f64 = hist
        .iter()
        .enumerate()
        .map(|(i, &c)| i as f64 * c as f64)
        .sum();

    let mut best_t = 0u8;
    let mut best_var = -1.0f64;
    let mut w_dark = 0u64;
    let mut sum_dark = 0.0f64;

    for (t, &count) in hist.iter().enumerate() {
        w_dark += count as u64;
        if w_dark == 0 {
            continue;
        }
        let w_light = total - w_dark;
        if w_light == 0 {
            break;
        }
        sum_dark += t as f64 * count as f64;
        let mean_dark = sum_dark / w_dark as f64;
        let mean_light = (sum_all - sum_dark) / w_light as f64;
        let diff = mean_dark - mean_light;
        let between = w_dark as f64 * w_light as f64 * diff * diff;
        if between > best_var {
            best_var = between;
            best_t = t as u8;
        }
    }

    Some(best_t)
}

/// Mark every pixel whose 8-bit luminance is `<= threshold` as foreground.
pub fn threshold_to_mask(plane: &LumaPlane, threshold: u8) -> ColorResult<BinaryMask> {
    let width = plane.width();
    Ok(BinaryMask::from_fn(width, plane.height(), |x, y| {
        let v = plane.values()[y as usize * width as usize + x as usize];
        to_level(v) <= threshold
    })?)
}

/// Quantize a [0, 1] luminance value to a gray level.
#[inline]
pub fn to_level(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0 + 0.5) as u8
}
