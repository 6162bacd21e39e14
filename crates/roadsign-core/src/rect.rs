//! Rect - Rectangle regions
//!
//! Bounding boxes of blobs and drawing targets.

/// A rectangle region
///
/// `x`/`y` is the top-left corner; `w`/`h` are the extent in pixels.
/// Small and `Copy`, so it is passed around by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// Left x coordinate
    pub x: i32,
    /// Top y coordinate
    pub y: i32,
    /// Width
    pub w: i32,
    /// Height
    pub h: i32,
}

impl Rect {
    /// Create a new rectangle
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Create the rectangle spanning two inclusive corner points
    pub fn from_extrema(xmin: i32, ymin: i32, xmax: i32, ymax: i32) -> Self {
        Self {
            x: xmin,
            y: ymin,
            w: xmax - xmin + 1,
            h: ymax - ymin + 1,
        }
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

    /// Get the horizontal midpoint (integer division)
    #[inline]
    pub fn center_x(&self) -> i32 {
        self.x + self.w / 2
    }

    /// Get the vertical midpoint (integer division)
    #[inline]
    pub fn center_y(&self) -> i32 {
        self.y + self.h / 2
    }

    /// Half the box perimeter, `w + h`
    #[inline]
    pub fn half_perimeter(&self) -> i32 {
        self.w + self.h
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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extrema() {
        let r = Rect::from_extrema(2, 3, 5, 3);
        assert_eq!(r, Rect::new(2, 3, 4, 1));
        assert_eq!(r.right(), 6);
        assert_eq!(r.bottom(), 4);
    }

    #[test]
    fn test_center_uses_integer_division() {
        let r = Rect::new(10, 0, 5, 7);
        assert_eq!(r.center_x(), 12);
        assert_eq!(r.center_y(), 3);
        assert_eq!(r.half_perimeter(), 12);
    }

    #[test]
    fn test_contains_point() {
        let r = Rect::new(1, 1, 2, 2);
        assert!(r.contains_point(1, 1));
        assert!(r.contains_point(2, 2));
        assert!(!r.contains_point(3, 2));
        assert!(!r.contains_point(0, 1));
        assert!(Rect::default().is_empty());
    }
}
