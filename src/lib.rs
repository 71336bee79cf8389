//! # kdpoint
//!
//! `kdpoint` is a Rust library for indexing points in the plane with a 2-d tree, designed
//! to be used in Rust as well as compiled to WebAssembly (WASM). It answers membership,
//! axis-aligned range and nearest-neighbor queries by pruning on the rectangle each tree
//! node partitions.
//!
//! ## Features
//!
//! - **2-d tree**: Alternating x / y splits, each node owning the cell it partitions.
//! - **Range search**: Skips every subtree whose cell misses the query rectangle.
//! - **Nearest neighbor**: Branch-and-bound search visiting the closer cell first.
//! - **Baseline**: A linear-scan [`PointSet`] with the same [`SpatialIndex`] interface for cross-checking.
//! - **WASM-first**: Built with `wasm-bindgen` for use from JavaScript and TypeScript.
//!
//! ## Example
//!
//! ```
//! use kdpoint::{KdTree, Point, Rectangle};
//!
//! let mut tree = KdTree::new(Rectangle::unit());
//! tree.insert(Point::new(0.7, 0.2));
//! tree.insert(Point::new(0.5, 0.4));
//! tree.insert(Point::new(0.2, 0.3));
//!
//! assert!(tree.contains(&Point::new(0.5, 0.4)));
//! assert_eq!(tree.range(&Rectangle::new(0.0, 0.0, 0.3, 0.5)), vec![Point::new(0.2, 0.3)]);
//! assert_eq!(tree.nearest(&Point::new(0.55, 0.45)), Some(Point::new(0.5, 0.4)));
//! ```
//!
//! See the `demos/` directory for SVG plotting of the partition.

mod bounds;
mod error;
mod index;
pub mod io;
mod kdtree;
mod point;
mod point_set;
mod wasm;

pub use bounds::Rectangle;
pub use error::IndexError;
pub use error::IndexResult;
pub use index::SpatialIndex;
pub use io::read_points;
pub use kdtree::KdTree;
pub use kdtree::Partition;
pub use point::Axis;
pub use point::Point;
pub use point_set::PointSet;
pub use wasm::KdTree2D;
pub use wasm::Rect2D;
