//! Error types for point and rectangle construction and point-file input.

use thiserror::Error;

/// Errors raised by invalid arguments or unreadable point input.
///
/// An empty index answering a nearest query is not an error; that case is `None`.
#[derive(Error, Debug)]
pub enum IndexError {
    /// A coordinate was NaN or infinite.
    #[error("non-finite point coordinate ({x}, {y})")]
    NonFinitePoint { x: f64, y: f64 },

    /// Rectangle bounds were non-finite or inverted.
    #[error("invalid rectangle [{xmin}, {xmax}] x [{ymin}, {ymax}]")]
    InvalidRectangle { xmin: f64, ymin: f64, xmax: f64, ymax: f64 },

    /// IO error from std::io
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed line in a point file.
    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },
}

/// Result type alias for index operations
pub type IndexResult<T> = Result<T, IndexError>;
