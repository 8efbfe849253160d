//! Main Raster type

use crate::error::{Error, Result};
use ndarray::{Array2, ArrayView2};

/// A 2D grid of `f64` cell values.
///
/// `Raster` holds one spatial slice of a field: rows run along latitude,
/// columns along longitude. Missing cells are NaN.
///
/// # Example
///
/// ```
/// use ndarray::array;
/// use patcorr_core::Raster;
///
/// let raster = Raster::from_array(array![[1.0, 2.0, 3.0], [4.0, f64::NAN, 6.0]]);
/// assert_eq!(raster.shape(), (2, 3));
/// assert!(raster.data()[[1, 1]].is_nan());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    /// Cell values in row-major order (row, col)
    data: Array2<f64>,
}

impl Raster {
    /// Create a raster from an ndarray
    pub fn from_array(data: Array2<f64>) -> Self {
        Self { data }
    }

    /// Dimensions as (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the raster has no cells
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Fail with [`Error::ShapeMismatch`] unless `other` has the same shape
    pub fn ensure_same_shape(&self, other: &Raster) -> Result<()> {
        let (er, ec) = self.shape();
        let (ar, ac) = other.shape();
        if (er, ec) != (ar, ac) {
            return Err(Error::shape_mismatch(&[er, ec], &[ar, ac]));
        }
        Ok(())
    }

    /// Get a view of the underlying data
    pub fn view(&self) -> ArrayView2<'_, f64> {
        self.data.view()
    }

    /// Get a reference to the underlying array
    pub fn data(&self) -> &Array2<f64> {
        &self.data
    }
}
