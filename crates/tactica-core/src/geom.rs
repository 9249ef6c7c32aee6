//! Geometry primitives: [`Point`], [`Range`], and the dense [`Location`]
//! address used to index per-cell tables.

use std::fmt;
use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// A 2D integer point. X grows right (east), Y grows down (south).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Create a new point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Step distance of this point read as a displacement.
    ///
    /// One tile counts 2 if straight (crossing an edge) and 3 if diagonal
    /// (crossing a corner), so adjacent cells are always at distance 2 or 3.
    #[inline]
    pub fn step_distance(self) -> u32 {
        let adx = self.x.unsigned_abs();
        let ady = self.y.unsigned_abs();
        2 * adx.max(ady) + adx.min(ady)
    }

    /// All eight neighbours, clockwise starting north.
    #[inline]
    pub fn neighbors_8(self) -> [Point; 8] {
        [
            Self::new(self.x, self.y - 1),
            Self::new(self.x + 1, self.y - 1),
            Self::new(self.x + 1, self.y),
            Self::new(self.x + 1, self.y + 1),
            Self::new(self.x, self.y + 1),
            Self::new(self.x - 1, self.y + 1),
            Self::new(self.x - 1, self.y),
            Self::new(self.x - 1, self.y - 1),
        ]
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Add for Point {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

// ---------------------------------------------------------------------------
// Range
// ---------------------------------------------------------------------------

/// A half-open rectangle `[min, max)`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    pub min: Point,
    pub max: Point,
}

impl Range {
    /// Create a range from corner coordinates.
    #[inline]
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            min: Point::new(x0, y0),
            max: Point::new(x1, y1),
        }
    }

    /// Width of the range.
    #[inline]
    pub const fn width(self) -> i32 {
        self.max.x - self.min.x
    }

    /// Height of the range.
    #[inline]
    pub const fn height(self) -> i32 {
        self.max.y - self.min.y
    }

    /// Total number of cells in the range.
    #[inline]
    pub fn len(self) -> usize {
        if self.is_empty() {
            return 0;
        }
        (self.width() as usize) * (self.height() as usize)
    }

    /// Whether the range has zero or negative area.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    /// Whether `p` is inside the half-open range.
    #[inline]
    pub fn contains(self, p: Point) -> bool {
        p.x >= self.min.x && p.x < self.max.x && p.y >= self.min.y && p.y < self.max.y
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}-{})", self.min, self.max)
    }
}

// ---------------------------------------------------------------------------
// Location
// ---------------------------------------------------------------------------

/// Dense address of one map cell, valid in `0..map_size`.
///
/// Per-cell tables (search queues, predecessor links) are indexed by
/// [`index`](Self::index).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location(pub u32);

impl Location {
    #[inline]
    pub const fn new(index: usize) -> Self {
        Self(index as u32)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An adjacent cell together with the step distance (2 or 3) to reach it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Neighbor {
    pub location: Location,
    pub distance: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_distance_orthogonal_and_diagonal() {
        assert_eq!(Point::new(1, 0).step_distance(), 2);
        assert_eq!(Point::new(0, -1).step_distance(), 2);
        assert_eq!(Point::new(-1, 1).step_distance(), 3);
        assert_eq!(Point::new(2, 1).step_distance(), 5);
        assert_eq!(Point::ZERO.step_distance(), 0);
    }

    #[test]
    fn neighbors_8_are_adjacent() {
        let p = Point::new(4, 4);
        for n in p.neighbors_8() {
            let d = (n - p).step_distance();
            assert!(d == 2 || d == 3, "unexpected distance {d} for {n}");
        }
    }

    #[test]
    fn range_len_and_contains() {
        let r = Range::new(0, 0, 4, 3);
        assert_eq!(r.len(), 12);
        assert!(r.contains(Point::new(3, 2)));
        assert!(!r.contains(Point::new(4, 0)));
        assert_eq!(Range::new(2, 2, 1, 5).len(), 0);
    }
}
