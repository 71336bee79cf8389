use crate::bounds::Rectangle;
use crate::point::Point;
use rayon::prelude::*;

/// Trait defining a point index with membership, range and nearest-neighbor queries.
/// This allows swapping between the 2-d tree (`KdTree`) and the linear-scan baseline (`PointSet`).
pub trait SpatialIndex: Send + Sync {
    /// Add a point if no point with identical coordinates is present.
    /// Returns `true` if the point was new.
    fn insert(&mut self, point: Point) -> bool;

    /// Check whether a point with identical coordinates is present.
    fn contains(&self, point: &Point) -> bool;

    /// Append every stored point inside `rect` (inclusive) to `results`.
    /// Order is implementation-defined; each point appears once.
    fn range_into(&self, rect: &Rectangle, results: &mut Vec<Point>);

    /// A stored point closest to `point`, or `None` if the index is empty.
    fn nearest(&self, point: &Point) -> Option<Point>;

    /// Number of distinct points stored.
    fn size(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// All stored points inside `rect`.
    fn range(&self, rect: &Rectangle) -> Vec<Point> {
        let mut results = Vec::new();
        self.range_into(rect, &mut results);
        results
    }

    /// Nearest-neighbor queries answered in parallel, one result per query.
    fn nearest_many(&self, queries: &[Point]) -> Vec<Option<Point>> {
        queries.par_iter().map(|q| self.nearest(q)).collect()
    }

    /// Membership queries answered in parallel, one result per query.
    fn contains_many(&self, queries: &[Point]) -> Vec<bool> {
        queries.par_iter().map(|q| self.contains(q)).collect()
    }
}
