//! Canvas Geometry
//!
//! Points and axis-aligned rectangles in the logical 850×500 canvas space.
//! Containment is inclusive on all four edges: a token centered exactly on
//! a rectangle edge counts as enclosed.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A point in logical canvas coordinates.
#[derive(Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate (canvas units)
    pub x: f32,
    /// Y coordinate (canvas units)
    pub y: f32,
}

impl Point {
    /// Origin point.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new point.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

/// An axis-aligned rectangle with normalized bounds (`min <= max`).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner (minimum x/y)
    pub min: Point,
    /// Bottom-right corner (maximum x/y)
    pub max: Point,
}

impl Rect {
    /// Build a rectangle from two arbitrary corners, normalizing so that
    /// `min` holds the componentwise minimum. The corners may coincide; a
    /// zero-area rectangle is valid and encloses exactly the points on it.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            min: Point::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Width of the rectangle.
    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Height of the rectangle.
    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Boundary-inclusive containment test.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_corners_normalizes() {
        let r = Rect::from_corners(Point::new(10.0, 20.0), Point::new(3.0, 5.0));
        assert_eq!(r.min, Point::new(3.0, 5.0));
        assert_eq!(r.max, Point::new(10.0, 20.0));
        assert_eq!(r.width(), 7.0);
        assert_eq!(r.height(), 15.0);
    }

    #[test]
    fn test_contains_is_edge_inclusive() {
        let r = Rect::from_corners(Point::new(0.0, 0.0), Point::new(10.0, 10.0));

        assert!(r.contains(Point::new(5.0, 5.0)));
        // All four edges and corners count as inside
        assert!(r.contains(Point::new(0.0, 5.0)));
        assert!(r.contains(Point::new(10.0, 5.0)));
        assert!(r.contains(Point::new(5.0, 0.0)));
        assert!(r.contains(Point::new(5.0, 10.0)));
        assert!(r.contains(Point::new(0.0, 0.0)));
        assert!(r.contains(Point::new(10.0, 10.0)));

        assert!(!r.contains(Point::new(10.1, 5.0)));
        assert!(!r.contains(Point::new(5.0, -0.1)));
    }

    #[test]
    fn test_zero_area_rect() {
        let r = Rect::from_corners(Point::new(4.0, 4.0), Point::new(4.0, 4.0));
        assert_eq!(r.width(), 0.0);
        assert!(r.contains(Point::new(4.0, 4.0)));
        assert!(!r.contains(Point::new(4.0, 4.5)));
    }
}
