//! figclass Core - Basic data structures for figure classification
//!
//! This crate provides the fundamental data structures used throughout
//! the figure classification workspace:
//!
//! - [`RasterImage`] - The decoded RGB figure (immutable, cheap to clone)
//! - [`LumaPlane`] - Floating-point luminance derived from a raster
//! - [`BinaryMask`] - Foreground/background maps (edges, binarizations)
//! - [`PixelBox`] - Rectangle regions
//!
//! With the `image` feature enabled, `RasterImage` converts from
//! `image::RgbImage` and `image::DynamicImage`.

pub mod error;
pub mod pixel_box;
pub mod plane;
pub mod raster;

pub use error::{Error, Result};
pub use pixel_box::PixelBox;
pub use plane::{BinaryMask, LumaPlane};
pub use raster::{RGB_CHANNELS, RasterImage};

/// Channel indices and luminance weighting for RGB pixels.
///
/// # Pixel format
///
/// Pixels are `[u8; 3]` triples in R, G, B order.
pub mod color {
    /// Red channel
    pub const RED: usize = 0;
    /// Green channel
    pub const GREEN: usize = 1;
    /// Blue channel
    pub const BLUE: usize = 2;

    /// ITU-R BT.601 luma weights
    pub const LUMA_RED: f64 = 0.299;
    pub const LUMA_GREEN: f64 = 0.587;
    pub const LUMA_BLUE: f64 = 0.114;

    /// Luminance of an RGB pixel, normalized to [0, 1].
    #[inline]
    pub fn luma(r: u8, g: u8, b: u8) -> f64 {
        let y = LUMA_RED * r as f64 + LUMA_GREEN * g as f64 + LUMA_BLUE * b as f64;
        (y / 255.0).clamp(0.0, 1.0)
    }

    /// Luminance of an RGB pixel as an 8-bit gray level.
    #[inline]
    pub fn luma_u8(r: u8, g: u8, b: u8) -> u8 {
        (luma(r, g, b) * 255.0 + 0.5) as u8
    }

}
