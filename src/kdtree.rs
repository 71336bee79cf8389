use crate::bounds::Rectangle;
use crate::index::SpatialIndex;
use crate::point::{Axis, Point};
use tracing::{trace, warn};

/// Marker for an empty child slot.
const NIL: u32 = u32::MAX;

#[derive(Clone, Copy, Debug)]
struct KdNode {
    point: Point,
    // Partition cell assigned at insertion time
    rect: Rectangle,
    lower: u32, // NIL if empty
    upper: u32,
}

impl KdNode {
    fn new(point: Point, rect: Rectangle) -> Self {
        KdNode { point, rect, lower: NIL, upper: NIL }
    }
}

/// Which child slot of a parent a descent ended in.
#[derive(Clone, Copy)]
enum Side {
    Lower,
    Upper,
}

/// Read-only view of one node of the tree, as returned by [`KdTree::partitions`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Partition {
    pub point: Point,
    /// The cell this node partitions.
    pub rect: Rectangle,
    /// Orientation of the splitting line through `point`.
    pub axis: Axis,
    /// Distance from the root (the root has depth 0).
    pub depth: usize,
    /// Cell of the lower child, if present.
    pub lower: Option<Rectangle>,
    /// Cell of the upper child, if present.
    pub upper: Option<Rectangle>,
}

/// A 2-d tree over unique points.
///
/// Levels alternate between splitting by x (the root) and by y. Each node owns the
/// rectangle it partitions: the root owns the domain bound given at construction and
/// every child owns its parent's rectangle clipped at the parent's splitting line.
/// Points comparing equal on the splitting axis go to the upper side.
///
/// Nodes live in a flat arena and are never removed or moved; the tree is not rebalanced,
/// so sorted insertion order degrades it to a list of depth `n`. Every traversal walks the
/// arena with an explicit stack, so a degenerate tree costs linear time per query but never
/// overflows the call stack.
#[derive(Clone, Debug)]
pub struct KdTree {
    domain: Rectangle,
    nodes: Vec<KdNode>,
    root: u32,
}

impl KdTree {
    /// Creates an empty tree whose root cell will be `domain`.
    ///
    /// Points outside `domain` are still stored and found by `contains`, but range and
    /// nearest pruning is only exact for points inside it.
    pub fn new(domain: Rectangle) -> Self {
        KdTree {
            domain,
            nodes: Vec::new(),
            root: NIL,
        }
    }

    pub fn with_capacity(domain: Rectangle, capacity: usize) -> Self {
        KdTree {
            domain,
            nodes: Vec::with_capacity(capacity),
            root: NIL,
        }
    }

    /// Builds a tree by inserting `points` in iteration order.
    pub fn from_points<I>(domain: Rectangle, points: I) -> Self
    where
        I: IntoIterator<Item = Point>,
    {
        let mut tree = KdTree::new(domain);
        tree.extend(points);
        tree
    }

    pub fn domain(&self) -> &Rectangle {
        &self.domain
    }

    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Stored points in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Point> + '_ {
        self.nodes.iter().map(|n| &n.point)
    }

    /// Adds `point` unless a point with identical coordinates is already stored.
    /// Returns `true` if the point was new.
    pub fn insert(&mut self, point: Point) -> bool {
        if !self.domain.contains(&point) {
            warn!(%point, domain = %self.domain, "inserting point outside the domain bound");
        }

        let mut axis = Axis::Vertical;
        let mut rect = self.domain;
        let mut parent: Option<(u32, Side)> = None;
        let mut current = self.root;

        while current != NIL {
            let node = &self.nodes[current as usize];
            if node.point == point {
                trace!(%point, "duplicate point ignored");
                return false;
            }

            let split = node.point.coord(axis);
            if point.coord(axis) < split {
                rect = node.rect.clip_lower(axis, split);
                parent = Some((current, Side::Lower));
                current = node.lower;
            } else {
                rect = node.rect.clip_upper(axis, split);
                parent = Some((current, Side::Upper));
                current = node.upper;
            }
            axis = axis.flip();
        }

        assert!(self.nodes.len() < NIL as usize, "KdTree node arena is full");
        let idx = self.nodes.len() as u32;
        self.nodes.push(KdNode::new(point, rect));

        match parent {
            None => self.root = idx,
            Some((p, Side::Lower)) => self.nodes[p as usize].lower = idx,
            Some((p, Side::Upper)) => self.nodes[p as usize].upper = idx,
        }
        true
    }

    /// Checks whether a point with identical coordinates is stored.
    pub fn contains(&self, point: &Point) -> bool {
        let mut axis = Axis::Vertical;
        let mut current = self.root;

        while current != NIL {
            let node = &self.nodes[current as usize];
            if node.point == *point {
                return true;
            }
            current = if point.coord(axis) < node.point.coord(axis) { node.lower } else { node.upper };
            axis = axis.flip();
        }
        false
    }

    /// All stored points inside `rect` (inclusive), in no particular order.
    pub fn range(&self, rect: &Rectangle) -> Vec<Point> {
        let mut results = Vec::new();
        self.range_into(rect, &mut results);
        results
    }

    /// Appends all stored points inside `rect` to `results` without clearing it first.
    pub fn range_into(&self, rect: &Rectangle, results: &mut Vec<Point>) {
        self.range_visiting(rect, results);
    }

    /// Range search returning the number of nodes entered, pruned ones included.
    fn range_visiting(&self, rect: &Rectangle, results: &mut Vec<Point>) -> usize {
        let mut visited = 0;
        let mut stack = vec![self.root];

        // Pre-order: upper is pushed first so lower is popped first
        while let Some(node_idx) = stack.pop() {
            if node_idx == NIL {
                continue;
            }
            visited += 1;
            let node = &self.nodes[node_idx as usize];

            // Pruning: the whole subtree lies inside the node's cell
            if !node.rect.intersects(rect) {
                continue;
            }
            if rect.contains(&node.point) {
                results.push(node.point);
            }

            stack.push(node.upper);
            stack.push(node.lower);
        }
        visited
    }

    /// A stored point closest to `target` in Euclidean distance, or `None` if the tree is empty.
    ///
    /// When several points are equally close, the first one reached by the search wins.
    pub fn nearest(&self, target: &Point) -> Option<Point> {
        self.nearest_visiting(target).0
    }

    /// Nearest search returning the number of nodes entered, pruned ones included.
    fn nearest_visiting(&self, target: &Point) -> (Option<Point>, usize) {
        let mut best = None;
        let mut best_dist_sq = f64::INFINITY;
        let mut visited = 0;
        let mut stack = vec![self.root];

        // A child is only tested against the bound when popped, i.e. after the
        // subtree pushed above it has been fully searched.
        while let Some(node_idx) = stack.pop() {
            if node_idx == NIL {
                continue;
            }
            visited += 1;
            let node = &self.nodes[node_idx as usize];

            // Pruning: nothing in this cell can beat the current best
            if node.rect.distance_squared_to(target) >= best_dist_sq {
                continue;
            }

            let d2 = node.point.distance_squared_to(target);
            if d2 < best_dist_sq {
                best = Some(node.point);
                best_dist_sq = d2;
            }

            // Visit the closer cell first so the bound is tight for the other one
            let (first, second) = if node.lower != NIL
                && node.upper != NIL
                && self.cell_distance_sq(node.lower, target) > self.cell_distance_sq(node.upper, target)
            {
                (node.upper, node.lower)
            } else {
                (node.lower, node.upper)
            };

            stack.push(second);
            stack.push(first);
        }
        (best, visited)
    }

    fn cell_distance_sq(&self, node_idx: u32, target: &Point) -> f64 {
        self.nodes[node_idx as usize].rect.distance_squared_to(target)
    }

    /// Number of nodes on the longest root-to-leaf path; zero for an empty tree.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack = vec![(self.root, 1)];
        while let Some((node_idx, depth)) = stack.pop() {
            if node_idx == NIL {
                continue;
            }
            height = height.max(depth);
            let node = &self.nodes[node_idx as usize];
            stack.push((node.lower, depth + 1));
            stack.push((node.upper, depth + 1));
        }
        height
    }

    /// Pre-order view of every node with its cell, orientation and child cells.
    pub fn partitions(&self) -> Vec<Partition> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let cell = |idx: u32| (idx != NIL).then(|| self.nodes[idx as usize].rect);
        let mut stack = vec![(self.root, Axis::Vertical, 0)];

        while let Some((node_idx, axis, depth)) = stack.pop() {
            if node_idx == NIL {
                continue;
            }
            let node = &self.nodes[node_idx as usize];
            out.push(Partition {
                point: node.point,
                rect: node.rect,
                axis,
                depth,
                lower: cell(node.lower),
                upper: cell(node.upper),
            });

            stack.push((node.upper, axis.flip(), depth + 1));
            stack.push((node.lower, axis.flip(), depth + 1));
        }
        out
    }
}

impl Default for KdTree {
    fn default() -> Self {
        KdTree::new(Rectangle::unit())
    }
}

impl Extend<Point> for KdTree {
    fn extend<I: IntoIterator<Item = Point>>(&mut self, iter: I) {
        for p in iter {
            self.insert(p);
        }
    }
}

impl SpatialIndex for KdTree {
    fn insert(&mut self, point: Point) -> bool {
        KdTree::insert(self, point)
    }

    fn contains(&self, point: &Point) -> bool {
        KdTree::contains(self, point)
    }

    fn range_into(&self, rect: &Rectangle, results: &mut Vec<Point>) {
        KdTree::range_into(self, rect, results)
    }

    fn nearest(&self, point: &Point) -> Option<Point> {
        KdTree::nearest(self, point)
    }

    fn size(&self) -> usize {
        KdTree::size(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> KdTree {
        KdTree::from_points(
            Rectangle::unit(),
            [(0.7, 0.2), (0.5, 0.4), (0.2, 0.3), (0.4, 0.7), (0.9, 0.6)]
                .into_iter()
                .map(|(x, y)| Point::new(x, y)),
        )
    }

    #[test]
    fn test_empty_tree() {
        let tree = KdTree::default();
        assert!(tree.is_empty());
        assert_eq!(tree.size(), 0);
        assert_eq!(tree.height(), 0);
        assert!(!tree.contains(&Point::new(0.5, 0.5)));
        assert!(tree.range(&Rectangle::unit()).is_empty());
        assert_eq!(tree.nearest(&Point::new(0.5, 0.5)), None);
    }

    #[test]
    fn test_root_owns_domain() {
        let domain = Rectangle::new(-1.0, -1.0, 2.0, 3.0);
        let mut tree = KdTree::new(domain);
        tree.insert(Point::new(0.5, 0.5));
        assert_eq!(tree.partitions()[0].rect, domain);
    }

    #[test]
    fn test_child_cells() {
        let tree = sample_tree();
        let parts = tree.partitions();
        // Pre-order: (0.7,0.2), (0.5,0.4), (0.2,0.3), (0.4,0.7), (0.9,0.6)
        assert_eq!(parts[0].point, Point::new(0.7, 0.2));
        assert_eq!(parts[0].axis, Axis::Vertical);
        assert_eq!(parts[1].point, Point::new(0.5, 0.4));
        assert_eq!(parts[1].rect, Rectangle::new(0.0, 0.0, 0.7, 1.0));
        assert_eq!(parts[1].axis, Axis::Horizontal);
        assert_eq!(parts[2].point, Point::new(0.2, 0.3));
        assert_eq!(parts[2].rect, Rectangle::new(0.0, 0.0, 0.7, 0.4));
        assert_eq!(parts[3].point, Point::new(0.4, 0.7));
        assert_eq!(parts[3].rect, Rectangle::new(0.0, 0.4, 0.7, 1.0));
        assert_eq!(parts[4].point, Point::new(0.9, 0.6));
        assert_eq!(parts[4].rect, Rectangle::new(0.7, 0.0, 1.0, 1.0));
        assert_eq!(tree.height(), 3);
    }

    #[test]
    fn test_equal_coordinate_goes_upper() {
        let mut tree = KdTree::default();
        tree.insert(Point::new(0.5, 0.5));
        // Same x, different y: must land in the upper (right) cell.
        tree.insert(Point::new(0.5, 0.1));

        let parts = tree.partitions();
        assert_eq!(parts[0].lower, None);
        assert_eq!(parts[0].upper, Some(Rectangle::new(0.5, 0.0, 1.0, 1.0)));
        assert!(tree.contains(&Point::new(0.5, 0.1)));

        // Same y as the horizontal splitter (0.5, 0.1): upper again.
        tree.insert(Point::new(0.8, 0.1));
        let parts = tree.partitions();
        assert_eq!(parts[2].point, Point::new(0.8, 0.1));
        assert_eq!(parts[2].rect, Rectangle::new(0.5, 0.1, 1.0, 1.0));
    }

    #[test]
    fn test_duplicate_insert_is_noop() {
        let mut tree = sample_tree();
        let before = tree.partitions();
        assert!(!tree.insert(Point::new(0.2, 0.3)));
        assert_eq!(tree.size(), 5);
        assert_eq!(tree.partitions(), before);
    }

    #[test]
    fn test_range_prunes_but_finds_boundary_points() {
        let tree = sample_tree();
        // Query touching only the split line x = 0.7 still finds (0.7, 0.2).
        let found = tree.range(&Rectangle::new(0.7, 0.0, 0.7, 0.3));
        assert_eq!(found, vec![Point::new(0.7, 0.2)]);
    }

    #[test]
    fn test_range_into_appends() {
        let tree = sample_tree();
        let mut results = vec![Point::new(9.0, 9.0)];
        tree.range_into(&Rectangle::new(0.8, 0.5, 1.0, 0.7), &mut results);
        assert_eq!(results, vec![Point::new(9.0, 9.0), Point::new(0.9, 0.6)]);
    }

    #[test]
    fn test_nearest_exact_hit() {
        let tree = sample_tree();
        assert_eq!(tree.nearest(&Point::new(0.4, 0.7)), Some(Point::new(0.4, 0.7)));
        assert_eq!(tree.nearest(&Point::new(0.95, 0.65)), Some(Point::new(0.9, 0.6)));
    }

    #[test]
    fn test_nearest_query_outside_domain() {
        let tree = sample_tree();
        assert_eq!(tree.nearest(&Point::new(5.0, 0.6)), Some(Point::new(0.9, 0.6)));
        assert_eq!(tree.nearest(&Point::new(-3.0, 0.3)), Some(Point::new(0.2, 0.3)));
    }

    #[test]
    fn test_point_outside_domain_is_stored() {
        let mut tree = KdTree::default();
        assert!(tree.insert(Point::new(1.5, -0.5)));
        assert!(tree.contains(&Point::new(1.5, -0.5)));
        assert_eq!(tree.size(), 1);
    }

    #[test]
    fn test_sorted_insertion_degrades_to_chain() {
        let mut tree = KdTree::default();
        for i in 0..100 {
            let v = i as f64 / 100.0;
            tree.insert(Point::new(v, v));
        }
        assert_eq!(tree.size(), 100);
        assert_eq!(tree.height(), 100);
        assert_eq!(tree.nearest(&Point::new(0.333, 0.333)), Some(Point::new(0.33, 0.33)));
    }

    #[test]
    fn test_iter_in_insertion_order() {
        let tree = sample_tree();
        let xs: Vec<f64> = tree.iter().map(|p| p.x()).collect();
        assert_eq!(xs, vec![0.7, 0.5, 0.2, 0.4, 0.9]);
    }

    fn random_tree(count: usize, seed: u64) -> KdTree {
        use rand::SeedableRng;
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        KdTree::from_points(Rectangle::unit(), Rectangle::unit().random_points(&mut rng, count))
    }

    #[test]
    fn test_range_skips_cells_outside_query() {
        let tree = random_tree(1000, 17);
        let mut results = Vec::new();
        let window = Rectangle::new(0.45, 0.45, 0.55, 0.55);
        let visited = tree.range_visiting(&window, &mut results);

        assert!(!results.is_empty());
        assert_eq!(results.len(), tree.iter().filter(|p| window.contains(p)).count());
        assert!(visited < tree.size() / 4, "range entered {} of {} nodes", visited, tree.size());

        // A query covering the domain has nothing to prune.
        results.clear();
        assert_eq!(tree.range_visiting(&Rectangle::unit(), &mut results), tree.size());
    }

    #[test]
    fn test_nearest_skips_cells_beyond_best() {
        use rand::SeedableRng;
        let tree = random_tree(1000, 23);
        let mut rng = rand::rngs::StdRng::seed_from_u64(5);

        let mut total = 0;
        let queries = Rectangle::unit().random_points(&mut rng, 100);
        for q in &queries {
            let (found, visited) = tree.nearest_visiting(q);
            let best = tree.iter().map(|p| p.distance_squared_to(q)).fold(f64::INFINITY, f64::min);
            assert_eq!(found.map(|p| p.distance_squared_to(q)), Some(best));
            assert!(visited < tree.size() / 4, "nearest entered {} of {} nodes", visited, tree.size());
            total += visited;
        }
        assert!(total / queries.len() < tree.size() / 8, "average of {} nodes entered", total / queries.len());
    }

    #[test]
    fn test_deep_chain_does_not_overflow() {
        let n = 20_000;
        let mut tree = KdTree::with_capacity(Rectangle::unit(), n);
        for i in 0..n {
            let v = i as f64 / n as f64;
            tree.insert(Point::new(v, v));
        }
        assert_eq!(tree.height(), n);

        let last = Point::new((n - 1) as f64 / n as f64, (n - 1) as f64 / n as f64);
        assert_eq!(tree.nearest(&Point::new(1.0, 1.0)), Some(last));
        assert_eq!(tree.range(&Rectangle::new(0.99992, 0.99992, 1.0, 1.0)), vec![last]);
        assert_eq!(tree.partitions().len(), n);
    }
}
