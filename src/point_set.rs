use crate::bounds::Rectangle;
use crate::index::SpatialIndex;
use crate::point::Point;

/// Brute-force point set answering every query by a linear scan.
///
/// Serves as the reference the 2-d tree is checked and benchmarked against.
#[derive(Clone, Debug, Default)]
pub struct PointSet {
    points: Vec<Point>,
}

impl PointSet {
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { points: Vec::with_capacity(capacity) }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point> + '_ {
        self.points.iter()
    }
}

impl SpatialIndex for PointSet {
    fn insert(&mut self, point: Point) -> bool {
        if self.contains(&point) {
            return false;
        }
        self.points.push(point);
        true
    }

    fn contains(&self, point: &Point) -> bool {
        self.points.iter().any(|p| p == point)
    }

    fn range_into(&self, rect: &Rectangle, results: &mut Vec<Point>) {
        results.extend(self.points.iter().filter(|p| rect.contains(p)));
    }

    fn nearest(&self, point: &Point) -> Option<Point> {
        let mut best: Option<(Point, f64)> = None;
        for p in &self.points {
            let d2 = p.distance_squared_to(point);
            match best {
                Some((_, best_d2)) if d2 >= best_d2 => {}
                _ => best = Some((*p, d2)),
            }
        }
        best.map(|(p, _)| p)
    }

    fn size(&self) -> usize {
        self.points.len()
    }
}

impl Extend<Point> for PointSet {
    fn extend<I: IntoIterator<Item = Point>>(&mut self, iter: I) {
        for p in iter {
            self.insert(p);
        }
    }
}

impl FromIterator<Point> for PointSet {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        let mut set = PointSet::new();
        set.extend(iter);
        set
    }
}
