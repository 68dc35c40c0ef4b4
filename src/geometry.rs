//! Core geometry types: Point, Size, Region, Spacing.
//!
//! All coordinates are `f32` pixels. Node positions are stored relative to the
//! parent; the event router and renderer convert them to absolute space by
//! summing ancestor offsets.

use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// A 2D position or displacement in pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// The origin.
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    /// Create a new point.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;
    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl Sub for Point {
    type Output = Point;
    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

// ---------------------------------------------------------------------------
// Size
// ---------------------------------------------------------------------------

/// A width/height pair in pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// A zero-sized size.
    pub const ZERO: Size = Size { width: 0.0, height: 0.0 };

    /// Create a new size.
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Whether either dimension is zero or negative.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Convert to a [`Region`] positioned at the origin.
    #[inline]
    pub fn region(self) -> Region {
        Region::new(0.0, 0.0, self.width, self.height)
    }
}

// ---------------------------------------------------------------------------
// Region
// ---------------------------------------------------------------------------

/// An axis-aligned rectangle defined by its top-left corner and size.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Region {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Region {
    /// An empty region at the origin.
    pub const EMPTY: Region = Region { x: 0.0, y: 0.0, width: 0.0, height: 0.0 };

    /// Create a new region.
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// The right edge (exclusive): `x + width`.
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// The bottom edge (exclusive): `y + height`.
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// The top-left corner.
    #[inline]
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// The dimensions as a [`Size`].
    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Whether the point (x, y) lies inside this region.
    ///
    /// The left/top edges are inclusive, the right/bottom edges exclusive.
    #[inline]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Translate the region by `offset`.
    #[inline]
    pub fn translate(self, offset: Point) -> Region {
        Region { x: self.x + offset.x, y: self.y + offset.y, ..self }
    }

    /// Contract the region inward by `spacing`, clamping to zero size.
    #[inline]
    pub fn shrink(self, spacing: Spacing) -> Region {
        Region {
            x: self.x + spacing.left,
            y: self.y + spacing.top,
            width: (self.width - spacing.horizontal()).max(0.0),
            height: (self.height - spacing.vertical()).max(0.0),
        }
    }
}

// ---------------------------------------------------------------------------
// Spacing
// ---------------------------------------------------------------------------

/// Spacing around the four sides of a rectangle, used for margin and padding.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Spacing {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Spacing {
    /// Zero spacing on all sides.
    pub const ZERO: Spacing = Spacing { top: 0.0, right: 0.0, bottom: 0.0, left: 0.0 };

    /// Create spacing with explicit values for each side.
    #[inline]
    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self { top, right, bottom, left }
    }

    /// All four sides set to the same value.
    #[inline]
    pub const fn all(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Symmetric spacing: `vertical` for top/bottom, `horizontal` for left/right.
    #[inline]
    pub const fn symmetric(vertical: f32, horizontal: f32) -> Self {
        Self::new(vertical, horizontal, vertical, horizontal)
    }

    /// Total horizontal extent: `left + right`.
    #[inline]
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// Total vertical extent: `top + bottom`.
    #[inline]
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_contains_is_half_open() {
        let r = Region::new(10.0, 10.0, 20.0, 5.0);
        assert!(r.contains(10.0, 10.0));
        assert!(r.contains(29.9, 14.9));
        assert!(!r.contains(30.0, 12.0));
        assert!(!r.contains(15.0, 15.0));
        assert!(!r.contains(9.9, 12.0));
    }

    #[test]
    fn region_shrink_clamps() {
        let r = Region::new(0.0, 0.0, 10.0, 4.0).shrink(Spacing::all(3.0));
        assert_eq!(r, Region::new(3.0, 3.0, 4.0, 0.0));
    }

    #[test]
    fn region_translate() {
        let r = Region::new(1.0, 2.0, 3.0, 4.0).translate(Point::new(10.0, 20.0));
        assert_eq!(r.origin(), Point::new(11.0, 22.0));
        assert_eq!(r.size(), Size::new(3.0, 4.0));
    }

    #[test]
    fn spacing_extents() {
        let s = Spacing::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(s.horizontal(), 6.0);
        assert_eq!(s.vertical(), 4.0);
        assert_eq!(Spacing::symmetric(5.0, 7.0), Spacing::new(5.0, 7.0, 5.0, 7.0));
    }

    #[test]
    fn point_arithmetic() {
        let p = Point::new(1.0, 2.0) + Point::new(3.0, 4.0);
        assert_eq!(p, Point::new(4.0, 6.0));
        assert_eq!(p - Point::new(4.0, 6.0), Point::ZERO);
    }

    #[test]
    fn size_empty() {
        assert!(Size::ZERO.is_empty());
        assert!(Size::new(5.0, 0.0).is_empty());
        assert!(!Size::new(5.0, 1.0).is_empty());
    }
}
