//! RasterImage - The decoded figure container
//!
//! A `RasterImage` is an immutable, 8-bit-per-channel RGB bitmap as handed
//! over by the extraction layer. Any other color space must be normalized
//! to RGB before construction.
//!
//! # Pixel layout
//!
//! - Pixels are stored row-major, top row first
//! - Each pixel is three consecutive bytes: R, G, B
//! - There is no row padding
//!
//! # Ownership model
//!
//! Pixel data lives behind an `Arc`, so cloning a `RasterImage` is cheap and
//! images can be shared freely between worker threads. There is no mutable
//! view; derived images (mirror, luminance) are new values.

use crate::color;
use crate::error::{Error, Result};
use crate::plane::LumaPlane;
use std::sync::Arc;

/// Number of channels in every `RasterImage`.
pub const RGB_CHANNELS: u32 = 3;

/// An owned, immutable RGB image.
///
/// Invariants (checked by every constructor):
/// - `width >= 1` and `height >= 1`
/// - channel count is exactly [`RGB_CHANNELS`]
/// - the buffer holds exactly `width * height * 3` bytes
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RasterImage {
    width: u32,
    height: u32,
    data: Arc<[u8]>,
}

impl RasterImage {
    /// Create an image from a raw interleaved buffer.
    ///
    /// # Arguments
    ///
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `channels` - Number of interleaved channels in `data` (must be 3)
    /// * `data` - Row-major pixel bytes
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidDimension`] if a dimension is zero or the size overflows
    /// - [`Error::InvalidChannelCount`] if `channels != 3`
    /// - [`Error::BufferSizeMismatch`] if `data` has the wrong length
    pub fn new(width: u32, height: u32, channels: u32, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        if channels != RGB_CHANNELS {
            return Err(Error::InvalidChannelCount(channels));
        }
        let expected = buffer_len(width, height)?;
        if data.len() != expected {
            return Err(Error::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data: data.into(),
        })
    }

    /// Create an image from an interleaved RGB buffer.
    pub fn from_rgb(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        Self::new(width, height, RGB_CHANNELS, data)
    }

    /// Create an image by evaluating `f(x, y)` for every pixel.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Result<Self>
    where
        F: FnMut(u32, u32) -> [u8; 3],
    {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let mut data = Vec::with_capacity(buffer_len(width, height)?);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&f(x, y));
            }
        }
        Self::from_rgb(width, height, data)
    }

    /// Create an image filled with a single color.
    pub fn filled(width: u32, height: u32, rgb: [u8; 3]) -> Result<Self> {
        Self::from_fn(width, height, |_, _| rgb)
    }

    /// Get the width
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the height
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get (width, height)
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Get the channel count (always 3)
    #[inline]
    pub fn channels(&self) -> u32 {
        RGB_CHANNELS
    }

    /// Total number of pixels
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Width divided by height
    #[inline]
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    /// Raw interleaved bytes
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Get the RGB value at (x, y), or `None` outside the image.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 3;
        Some([self.data[i], self.data[i + 1], self.data[i + 2]])
    }

    /// Iterate over all pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = [u8; 3]> + '_ {
        self.data.chunks_exact(3).map(|p| [p[0], p[1], p[2]])
    }

    /// Check whether every pixel has the same RGB value.
    pub fn is_uniform(&self) -> bool {
        let first = &self.data[..3];
        self.data.chunks_exact(3).all(|p| p == first)
    }

    /// Mirror the image left-to-right.
    pub fn mirrored_horizontal(&self) -> RasterImage {
        let row_len = self.width as usize * 3;
        let mut data = Vec::with_capacity(self.data.len());
        for row in self.data.chunks_exact(row_len) {
            for p in row.chunks_exact(3).rev() {
                data.extend_from_slice(p);
            }
        }
        RasterImage {
            width: self.width,
            height: self.height,
            data: data.into(),
        }
    }

    /// Compute the normalized luminance plane (BT.601 weights, [0, 1]).
    pub fn to_luma(&self) -> LumaPlane {
        let values = self
            .pixels()
            .map(|[r, g, b]| color::luma(r, g, b))
            .collect();
        LumaPlane::from_parts(self.width, self.height, values)
    }
}

fn buffer_len(width: u32, height: u32) -> Result<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(RGB_CHANNELS as usize))
        .ok_or(Error::InvalidDimension { width, height })
}

#[cfg(feature = "image")]
mod interop {
    use super::RasterImage;
    use crate::error::{Error, Result};

    impl TryFrom<image::RgbImage> for RasterImage {
        type Error = Error;

        fn try_from(img: image::RgbImage) -> Result<Self> {
            let (width, height) = img.dimensions();
            RasterImage::from_rgb(width, height, img.into_raw())
        }
    }

    impl TryFrom<&image::DynamicImage> for RasterImage {
        type Error = Error;

        /// Normalizes any decoded color layout (gray, RGBA, 16-bit) to RGB8.
        fn try_from(img: &image::DynamicImage) -> Result<Self> {
            RasterImage::try_from(img.to_rgb8())
        }
    }

    impl From<&RasterImage> for image::RgbImage {
        fn from(raster: &RasterImage) -> Self {
            let (width, height) = raster.dimensions();
            image::RgbImage::from_fn(width, height, |x, y| {
                image::Rgb(raster.pixel(x, y).unwrap_or([0, 0, 0]))
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_valid() {
        let img = RasterImage::new(2, 3, 3, vec![0; 18]).unwrap();
        assert_eq!(img.dimensions(), (2, 3));
        assert_eq!(img.channels(), 3);
        assert_eq!(img.pixel_count(), 6);
    }

    #[test]
    fn test_new_zero_dimension() {
        let err = RasterImage::new(0, 10, 3, vec![]).unwrap_err();
        assert!(matches!(err, Error::InvalidDimension { width: 0, height: 10 }));
        assert!(err.is_invalid_image());
    }

    #[test]
    fn test_new_wrong_channels() {
        let err = RasterImage::new(2, 2, 4, vec![0; 16]).unwrap_err();
        assert!(matches!(err, Error::InvalidChannelCount(4)));
    }

    #[test]
    fn test_new_buffer_mismatch() {
        let err = RasterImage::new(2, 2, 3, vec![0; 11]).unwrap_err();
        assert!(matches!(
            err,
            Error::BufferSizeMismatch {
                expected: 12,
                actual: 11
            }
        ));
    }

    #[test]
    fn test_pixel_access() {
        let img = RasterImage::from_fn(3, 2, |x, y| [x as u8, y as u8, 7]).unwrap();
        assert_eq!(img.pixel(2, 1), Some([2, 1, 7]));
        assert_eq!(img.pixel(3, 0), None);
        assert_eq!(img.pixels().count(), 6);
    }

    #[test]
    fn test_is_uniform() {
        assert!(RasterImage::filled(5, 5, [10, 20, 30]).unwrap().is_uniform());
        let img = RasterImage::from_fn(5, 5, |x, _| [x as u8, 0, 0]).unwrap();
        assert!(!img.is_uniform());
    }

    #[test]
    fn test_mirrored_horizontal() {
        let img = RasterImage::from_fn(3, 2, |x, y| [x as u8, y as u8, 0]).unwrap();
        let m = img.mirrored_horizontal();
        assert_eq!(m.pixel(0, 0), Some([2, 0, 0]));
        assert_eq!(m.pixel(2, 1), Some([0, 1, 0]));
        assert_eq!(m.mirrored_horizontal(), img);
    }

    #[test]
    fn test_to_luma_range() {
        let img = RasterImage::from_fn(2, 1, |x, _| if x == 0 { [0; 3] } else { [255; 3] })
            .unwrap();
        let luma = img.to_luma();
        assert_eq!(luma.get(0, 0), Some(0.0));
        assert!((luma.get(1, 0).unwrap() - 1.0).abs() < 1e-9);
    }

    #[cfg(feature = "image")]
    #[test]
    fn test_from_image_crate() {
        let rgb = image::RgbImage::from_pixel(4, 2, image::Rgb([1, 2, 3]));
        let raster = RasterImage::try_from(rgb).unwrap();
        assert_eq!(raster.dimensions(), (4, 2));
        assert_eq!(raster.pixel(3, 1), Some([1, 2, 3]));
    }
}
