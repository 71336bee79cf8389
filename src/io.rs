//! Point-file input.
//!
//! A point file holds one point per line as two whitespace-separated coordinates,
//! `x y`. Blank lines and lines starting with `#` are skipped.

use crate::error::{IndexError, IndexResult};
use crate::point::Point;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Reads all points from the file at `path`.
pub fn read_points<P: AsRef<Path>>(path: P) -> IndexResult<Vec<Point>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let points = parse_points(&contents)?;
    debug!(path = %path.display(), count = points.len(), "loaded points");
    Ok(points)
}

/// Parses points from the text of a point file.
pub fn parse_points(contents: &str) -> IndexResult<Vec<Point>> {
    let mut points = Vec::new();
    for (i, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let line_no = i + 1;
        let coords = line
            .split_whitespace()
            .map(|s| s.parse::<f64>())
            .collect::<Result<Vec<f64>, _>>()
            .map_err(|e| IndexError::Parse { line: line_no, message: e.to_string() })?;

        if coords.len() != 2 {
            return Err(IndexError::Parse {
                line: line_no,
                message: format!("expected 2 coordinates, found {}", coords.len()),
            });
        }
        points.push(Point::try_new(coords[0], coords[1])?);
    }
    Ok(points)
}
