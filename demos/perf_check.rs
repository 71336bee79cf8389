use kdpoint::{KdTree, Rectangle, SpatialIndex};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Instant;
use tracing::info;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Initialize Rayon explicitly so thread creation happens
    // before the queries we want to profile.
    rayon::ThreadPoolBuilder::new().build_global().unwrap();

    let bounds = Rectangle::unit();
    let mut rng = StdRng::seed_from_u64(123456789);

    // 1,000,000 points is enough to get a good profile
    let points = bounds.random_points(&mut rng, 1_000_000);
    let queries = bounds.random_points(&mut rng, 100_000);

    let start = Instant::now();
    let tree = KdTree::from_points(bounds, points);
    info!(size = tree.size(), height = tree.height(), elapsed = ?start.elapsed(), "built tree");

    // Run the queries (this is the hot path)
    let start = Instant::now();
    let found = tree.nearest_many(&queries).iter().filter(|n| n.is_some()).count();
    info!(queries = queries.len(), found, elapsed = ?start.elapsed(), "nearest queries");
}
