//! Error types for patcorr

use thiserror::Error;

/// Main error type for patcorr operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),

    #[error("Dimension not found: {name}")]
    MissingDimension { name: String },

    #[error("Coordinate value {value} not found along dimension {dim}")]
    CoordinateNotFound { dim: String, value: f64 },

    #[error("Coordinate value {value} appears {count} times along dimension {dim}")]
    DuplicateCoordinate {
        dim: String,
        value: f64,
        count: usize,
    },

    #[error("Invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Shape mismatch between two array shapes of any rank
    pub fn shape_mismatch(expected: &[usize], actual: &[usize]) -> Self {
        Error::ShapeMismatch {
            expected: expected.to_vec(),
            actual: actual.to_vec(),
        }
    }
}

impl From<ndarray::ShapeError> for Error {
    fn from(e: ndarray::ShapeError) -> Self {
        Error::Other(e.to_string())
    }
}

/// Result type alias for patcorr operations
pub type Result<T> = std::result::Result<T, Error>;
