use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kdpoint::{KdTree, PointSet, Rectangle, SpatialIndex};
use rand::SeedableRng;
use rand::rngs::StdRng;

const NUM_POINTS: usize = 10_000;
const NUM_QUERIES: usize = 1_000;

fn benchmark_compare_insert(c: &mut Criterion) {
    let bounds = Rectangle::unit();
    let mut rng = StdRng::seed_from_u64(123456789);
    let points = bounds.random_points(&mut rng, NUM_POINTS);

    let mut group = c.benchmark_group("insert");

    group.bench_function("kdtree", |b| {
        b.iter(|| {
            let tree = KdTree::from_points(bounds, black_box(&points).iter().copied());
            black_box(tree.size())
        })
    });

    // Linear dedup makes this quadratic, so use a tenth of the points.
    let few = &points[..NUM_POINTS / 10];
    group.bench_function("point_set", |b| {
        b.iter(|| {
            let set: PointSet = black_box(few).iter().copied().collect();
            black_box(set.size())
        })
    });

    group.finish();
}

fn benchmark_compare_queries(c: &mut Criterion) {
    let bounds = Rectangle::unit();
    let mut rng = StdRng::seed_from_u64(123456789);
    let points = bounds.random_points(&mut rng, NUM_POINTS);
    let queries = bounds.random_points(&mut rng, NUM_QUERIES);
    let window = Rectangle::new(0.4, 0.4, 0.5, 0.5);

    let tree = KdTree::from_points(bounds, points.iter().copied());
    let set: PointSet = points.iter().copied().collect();

    let mut group = c.benchmark_group("nearest");
    group.bench_function("kdtree", |b| {
        b.iter(|| {
            for q in &queries {
                black_box(tree.nearest(q));
            }
        })
    });
    group.bench_function("kdtree_parallel", |b| {
        b.iter(|| black_box(tree.nearest_many(&queries)))
    });
    group.bench_function("point_set", |b| {
        b.iter(|| {
            for q in &queries {
                black_box(set.nearest(q));
            }
        })
    });
    group.finish();

    let mut group = c.benchmark_group("range");
    group.bench_function("kdtree", |b| {
        let mut results = Vec::new();
        b.iter(|| {
            results.clear();
            tree.range_into(black_box(&window), &mut results);
            black_box(results.len())
        })
    });
    group.bench_function("point_set", |b| {
        let mut results = Vec::new();
        b.iter(|| {
            results.clear();
            set.range_into(black_box(&window), &mut results);
            black_box(results.len())
        })
    });
    group.finish();
}

criterion_group!(benches, benchmark_compare_insert, benchmark_compare_queries);
criterion_main!(benches);
