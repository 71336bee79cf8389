use crate::error::{IndexError, IndexResult};
use std::fmt;

/// Splitting axis of a tree level.
///
/// The root splits vertically (by x) and every level below flips.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// Split by x-coordinate.
    Vertical,
    /// Split by y-coordinate.
    Horizontal,
}

impl Axis {
    /// The axis used one level further down.
    pub fn flip(self) -> Axis {
        match self {
            Axis::Vertical => Axis::Horizontal,
            Axis::Horizontal => Axis::Vertical,
        }
    }

    /// Array index of the coordinate this axis compares (0 = x, 1 = y).
    pub fn index(self) -> usize {
        match self {
            Axis::Vertical => 0,
            Axis::Horizontal => 1,
        }
    }
}

/// An immutable point in the plane with finite coordinates.
///
/// Equality is exact coordinate equality.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a new point.
    ///
    /// # Panics
    /// Panics if either coordinate is NaN or infinite. Use [`Point::try_new`] to get an error instead.
    pub fn new(x: f64, y: f64) -> Point {
        match Point::try_new(x, y) {
            Ok(p) => p,
            Err(e) => panic!("{}", e),
        }
    }

    /// Creates a new point, rejecting non-finite coordinates.
    pub fn try_new(x: f64, y: f64) -> IndexResult<Point> {
        if !x.is_finite() || !y.is_finite() {
            return Err(IndexError::NonFinitePoint { x, y });
        }
        Ok(Point { x, y })
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    /// Coordinate compared at a level with the given orientation.
    pub fn coord(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Vertical => self.x,
            Axis::Horizontal => self.y,
        }
    }

    pub fn distance_squared_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        self.distance_squared_to(other).sqrt()
    }
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
