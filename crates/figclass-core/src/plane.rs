//! Single-channel planes derived from a `RasterImage`
//!
//! - [`LumaPlane`]: floating-point luminance in [0, 1]
//! - [`BinaryMask`]: foreground/background map (edge maps, binarizations)
//!
//! Both are plain row-major buffers with the same dimensions as the image
//! they were computed from.

use crate::error::{Error, Result};

/// Floating-point luminance plane, values in [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct LumaPlane {
    width: u32,
    height: u32,
    data: Vec<f64>,
}

impl LumaPlane {
    /// Create a plane from row-major values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] for a zero dimension and
    /// [`Error::BufferSizeMismatch`] if `data.len() != width * height`.
    pub fn new(width: u32, height: u32, data: Vec<f64>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(Error::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub(crate) fn from_parts(width: u32, height: u32, data: Vec<f64>) -> Self {
        Self {
            width,
            height,
            data,
        }
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

    /// Get the value at (x, y)
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<f64> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[y as usize * self.width as usize + x as usize])
    }

    /// Get the value at (x, y) with coordinates clamped into the plane.
    ///
    /// Used by 3x3 operators: the border is replicated outward.
    #[inline]
    pub fn get_clamped(&self, x: i64, y: i64) -> f64 {
        let cx = x.clamp(0, self.width as i64 - 1) as usize;
        let cy = y.clamp(0, self.height as i64 - 1) as usize;
        self.data[cy * self.width as usize + cx]
    }

    /// All values in row-major order
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.data
    }

    /// Mean value
    pub fn mean(&self) -> f64 {
        self.data.iter().sum::<f64>() / self.data.len() as f64
    }

    /// Population standard deviation
    pub fn std_dev(&self) -> f64 {
        let mean = self.mean();
        let var = self
            .data
            .iter()
            .map(|v| (v - mean) * (v - mean))
            .sum::<f64>()
            / self.data.len() as f64;
        var.max(0.0).sqrt()
    }

    /// (min, max) over the plane
    pub fn min_max(&self) -> (f64, f64) {
        self.data
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }
}

/// Binary foreground/background map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryMask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl BinaryMask {
    /// Create an all-background mask.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        Ok(Self {
            width,
            height,
            bits: vec![false; width as usize * height as usize],
        })
    }

    /// Create a mask by evaluating `f(x, y)` for every pixel.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Result<Self>
    where
        F: FnMut(u32, u32) -> bool,
    {
        let mut mask = Self::new(width, height)?;
        for y in 0..height {
            for x in 0..width {
                if f(x, y) {
                    mask.bits[y as usize * width as usize + x as usize] = true;
                }
            }
        }
        Ok(mask)
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

    /// Check a pixel; coordinates outside the mask read as background.
    #[inline]
    pub fn get(&self, x: i64, y: i64) -> bool {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return false;
        }
        self.bits[y as usize * self.width as usize + x as usize]
    }

    /// Set a pixel.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] outside the mask.
    pub fn set(&mut self, x: u32, y: u32, value: bool) -> Result<()> {
        let len = self.bits.len();
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                index: y as usize * self.width as usize + x as usize,
                len,
            });
        }
        self.bits[y as usize * self.width as usize + x as usize] = value;
        Ok(())
    }

    /// Number of foreground pixels
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Foreground fraction in [0, 1]
    pub fn coverage(&self) -> f64 {
        self.count() as f64 / self.bits.len() as f64
    }

    /// Swap foreground and background.
    pub fn invert(&self) -> BinaryMask {
        BinaryMask {
            width: self.width,
            height: self.height,
            bits: self.bits.iter().map(|b| !b).collect(),
        }
    }

    /// Row-major bits
    #[inline]
    pub fn as_slice(&self) -> &[bool] {
        &self.bits
    }
}
