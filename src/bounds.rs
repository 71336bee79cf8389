use crate::error::{IndexError, IndexResult};
use crate::point::{Axis, Point};
use rand::Rng;
use std::fmt;

/// Axis-aligned rectangle in the plane, stored as per-axis `min` / `max` bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rectangle {
    min: [f64; 2],
    max: [f64; 2],
}

impl Rectangle {
    /// Creates a new rectangle from `(xmin, ymin)` to `(xmax, ymax)`.
    ///
    /// # Panics
    /// Panics if a bound is non-finite or `xmin > xmax` / `ymin > ymax`.
    pub fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        match Self::try_new(xmin, ymin, xmax, ymax) {
            Ok(r) => r,
            Err(e) => panic!("{}", e),
        }
    }

    pub fn try_new(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> IndexResult<Self> {
        let finite = [xmin, ymin, xmax, ymax].iter().all(|v| v.is_finite());
        if !finite || xmin > xmax || ymin > ymax {
            return Err(IndexError::InvalidRectangle { xmin, ymin, xmax, ymax });
        }
        Ok(Self { min: [xmin, ymin], max: [xmax, ymax] })
    }

    /// The unit square `[0, 1] x [0, 1]`.
    pub fn unit() -> Self {
        Self { min: [0.0, 0.0], max: [1.0, 1.0] }
    }

    pub fn xmin(&self) -> f64 {
        self.min[0]
    }

    pub fn ymin(&self) -> f64 {
        self.min[1]
    }

    pub fn xmax(&self) -> f64 {
        self.max[0]
    }

    pub fn ymax(&self) -> f64 {
        self.max[1]
    }

    pub fn width(&self) -> f64 {
        self.max[0] - self.min[0]
    }

    pub fn height(&self) -> f64 {
        self.max[1] - self.min[1]
    }

    /// Lower bound along `axis`.
    pub fn min(&self, axis: Axis) -> f64 {
        self.min[axis.index()]
    }

    /// Upper bound along `axis`.
    pub fn max(&self, axis: Axis) -> f64 {
        self.max[axis.index()]
    }

    /// Inclusive point containment.
    pub fn contains(&self, p: &Point) -> bool {
        p.x() >= self.min[0] && p.x() <= self.max[0] && p.y() >= self.min[1] && p.y() <= self.max[1]
    }

    /// Inclusive intersection test: rectangles touching on an edge or corner intersect.
    pub fn intersects(&self, other: &Rectangle) -> bool {
        self.max[0] >= other.min[0]
            && self.max[1] >= other.min[1]
            && other.max[0] >= self.min[0]
            && other.max[1] >= self.min[1]
    }

    /// Squared distance from `p` to the closest point of the rectangle, zero inside.
    pub fn distance_squared_to(&self, p: &Point) -> f64 {
        let q = [p.x(), p.y()];
        let mut d2 = 0.0;
        for i in 0..2 {
            let v = q[i];
            if v < self.min[i] {
                d2 += (self.min[i] - v).powi(2);
            } else if v > self.max[i] {
                d2 += (v - self.max[i]).powi(2);
            }
        }
        d2
    }

    pub fn distance_to(&self, p: &Point) -> f64 {
        self.distance_squared_to(p).sqrt()
    }

    /// The part of this rectangle on the "less" side of the line `axis = split`.
    ///
    /// The upper bound along `axis` is lowered to `split`.
    pub(crate) fn clip_lower(&self, axis: Axis, split: f64) -> Self {
        let mut max = self.max;
        max[axis.index()] = split;
        Self { min: self.min, max }
    }

    /// The part of this rectangle on the "greater-or-equal" side of the line `axis = split`.
    ///
    /// The lower bound along `axis` is raised to `split`.
    pub(crate) fn clip_upper(&self, axis: Axis, split: f64) -> Self {
        let mut min = self.min;
        min[axis.index()] = split;
        Self { min, max: self.max }
    }

    /// Draws `count` points uniformly inside the rectangle.
    pub fn random_points<R: Rng>(&self, rng: &mut R, count: usize) -> Vec<Point> {
        let w = self.width();
        let h = self.height();
        (0..count)
            .map(|_| {
                let x = self.min[0] + rng.r#gen::<f64>() * w;
                let y = self.min[1] + rng.r#gen::<f64>() * h;
                Point::new(x, y)
            })
            .collect()
    }
}

impl Default for Rectangle {
    fn default() -> Self {
        Self::unit()
    }
}

impl fmt::Display for Rectangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}] x [{}, {}]", self.min[0], self.max[0], self.min[1], self.max[1])
    }
}
