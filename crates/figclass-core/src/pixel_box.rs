//! PixelBox - Rectangle regions in pixel coordinates

/// A rectangle region in pixel coordinates.
///
/// A small `Copy` type; used for component bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PixelBox {
    /// Left x coordinate
    pub x: i32,
    /// Top y coordinate
    pub y: i32,
    /// Width
    pub w: i32,
    /// Height
    pub h: i32,
}

impl PixelBox {
    /// Create a box without validation
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Create the smallest box covering two inclusive corner points
    pub fn from_inclusive_corners(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        let (x, w) = (x1.min(x2), (x1 - x2).abs() + 1);
        let (y, h) = (y1.min(y2), (y1 - y2).abs() + 1);
        Self { x, y, w, h }
    }

    /// Get the right x coordinate (exclusive)
    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    /// Get the bottom y coordinate (exclusive)
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Get the area
    #[inline]
    pub fn area(&self) -> i64 {
        self.w as i64 * self.h as i64
    }

    /// Check if the box is empty (zero area)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Check if a point is inside the box
    #[inline]
    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Check whether the box touches the edge of a `width` x `height` image
    pub fn touches_image_border(&self, width: u32, height: u32) -> bool {
        self.x <= 0 || self.y <= 0 || self.right() >= width as i32 || self.bottom() >= height as i32
    }

    /// Grow the box so it covers (x, y).
    pub fn include_point(&mut self, x: i32, y: i32) {
        if self.is_empty() {
            *self = Self::new(x, y, 1, 1);
            return;
        }
        let left = self.x.min(x);
        let top = self.y.min(y);
        let right = self.right().max(x + 1);
        let bottom = self.bottom().max(y + 1);
        *self = Self::new(left, top, right - left, bottom - top);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_inclusive_corners() {
        let b = PixelBox::from_inclusive_corners(5, 7, 2, 3);
        assert_eq!(b, PixelBox::new(2, 3, 4, 5));
        assert_eq!(b.area(), 20);
    }

    #[test]
    fn test_include_point() {
        let mut b = PixelBox::default();
        b.include_point(3, 4);
        assert_eq!(b, PixelBox::new(3, 4, 1, 1));
        b.include_point(1, 6);
        assert_eq!(b, PixelBox::new(1, 4, 3, 3));
        assert!(b.contains_point(2, 5));
    }

    #[test]
    fn test_touches_border() {
        assert!(PixelBox::new(0, 5, 3, 3).touches_image_border(10, 10));
        assert!(PixelBox::new(5, 5, 5, 2).touches_image_border(10, 10));
        assert!(!PixelBox::new(2, 2, 3, 3).touches_image_border(10, 10));
    }
}
