use kdpoint::{read_points, Axis, KdTree, Point, Rectangle};
use plotters::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Optional point file as first argument, random points otherwise
    let bounds = Rectangle::unit();
    let points = match std::env::args().nth(1) {
        Some(path) => read_points(path)?,
        None => {
            let mut rng = StdRng::seed_from_u64(123456789);
            bounds.random_points(&mut rng, 200)
        }
    };
    let tree = KdTree::from_points(bounds, points);

    let query = Point::new(0.55, 0.45);
    let window = Rectangle::new(0.1, 0.1, 0.4, 0.35);

    let filename = "2d_tree_partition.svg";
    let root = SVGBackend::new(filename, (1024, 1024)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .build_cartesian_2d(bounds.xmin()..bounds.xmax(), bounds.ymin()..bounds.ymax())?;

    // Draw bounding box
    chart.draw_series(std::iter::once(outline(&bounds)))?;

    // Draw splitting lines: red for vertical, blue for horizontal
    for part in tree.partitions() {
        let (from, to, color) = match part.axis {
            Axis::Vertical => ((part.point.x(), part.rect.ymin()), (part.point.x(), part.rect.ymax()), RED),
            Axis::Horizontal => ((part.rect.xmin(), part.point.y()), (part.rect.xmax(), part.point.y()), BLUE),
        };
        chart.draw_series(std::iter::once(PathElement::new(vec![from, to], color.stroke_width(1))))?;
    }

    // Highlight the range window and the points it finds
    chart.draw_series(std::iter::once(plotters::element::Rectangle::new(
        [(window.xmin(), window.ymin()), (window.xmax(), window.ymax())],
        GREEN.mix(0.15).filled(),
    )))?;
    let found = tree.range(&window);

    // Draw points
    chart.draw_series(tree.iter().map(|p| Circle::new((p.x(), p.y()), 3, BLACK.filled())))?;
    chart.draw_series(found.iter().map(|p| Circle::new((p.x(), p.y()), 5, GREEN.filled())))?;

    // Draw the nearest-neighbor query
    if let Some(nearest) = tree.nearest(&query) {
        chart.draw_series(std::iter::once(PathElement::new(
            vec![(query.x(), query.y()), (nearest.x(), nearest.y())],
            MAGENTA.stroke_width(2),
        )))?;
    }
    chart.draw_series(std::iter::once(Cross::new((query.x(), query.y()), 6, MAGENTA.stroke_width(2))))?;

    root.present()?;
    println!(
        "{} points, height {}, {} in window. Output saved to {}",
        tree.size(),
        tree.height(),
        found.len(),
        filename
    );
    Ok(())
}

/// Closed outline of a rectangle as a path.
fn outline(r: &Rectangle) -> PathElement<(f64, f64)> {
    PathElement::new(
        vec![
            (r.xmin(), r.ymin()),
            (r.xmax(), r.ymin()),
            (r.xmax(), r.ymax()),
            (r.xmin(), r.ymax()),
            (r.xmin(), r.ymin()),
        ],
        BLACK.stroke_width(2),
    )
}
