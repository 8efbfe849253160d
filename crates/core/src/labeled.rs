//! Labeled n-dimensional fields
//!
//! A [`LabeledField`] pairs an `ndarray::ArrayD<f64>` with one named
//! [`Dimension`] per axis and a free-form [`Attributes`] map. Axes are looked
//! up by name, never by position, so `(time, lat, lon)` and `(lon, time, lat)`
//! layouts are interchangeable for every operation here.
//!
//! Coordinates are plain `f64`. A time axis holds numeric offsets such as
//! days since 1850-01-01; converting calendar dates is up to the caller.

use crate::error::{Error, Result};
use crate::raster::Raster;
use ndarray::{ArrayD, ArrayViewD, Axis, Ix2, IxDyn};
use std::collections::BTreeMap;

/// Free-form provenance metadata (units, model name, ...)
pub type Attributes = BTreeMap<String, String>;

/// A named axis with its ordered coordinate values
#[derive(Debug, Clone, PartialEq)]
pub struct Dimension {
    name: String,
    coords: Vec<f64>,
}

impl Dimension {
    /// Create a dimension from a name and its coordinate values
    pub fn new(name: impl Into<String>, coords: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            coords,
        }
    }

    /// Dimension whose coordinates are `0, 1, ..., len - 1`
    pub fn indexed(name: impl Into<String>, len: usize) -> Self {
        Self::new(name, (0..len).map(|i| i as f64).collect())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn coords(&self) -> &[f64] {
        &self.coords
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Positions of every coordinate exactly equal to `value`
    pub fn positions(&self, value: f64) -> Vec<usize> {
        self.coords
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c == value)
            .map(|(i, _)| i)
            .collect()
    }
}

/// An n-dimensional field with named coordinate dimensions and attributes.
///
/// # Example
///
/// ```
/// use ndarray::ArrayD;
/// use patcorr_core::{Dimension, LabeledField};
///
/// let field = LabeledField::new(
///     ArrayD::zeros(vec![2, 3]),
///     vec![Dimension::new("lat", vec![-45.0, 45.0]), Dimension::indexed("lon", 3)],
/// )
/// .unwrap();
/// assert_eq!(field.len_of("lon").unwrap(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledField {
    data: ArrayD<f64>,
    dims: Vec<Dimension>,
    attrs: Attributes,
}

impl LabeledField {
    /// Create a labeled field, validating dimensions against the array shape
    pub fn new(data: ArrayD<f64>, dims: Vec<Dimension>) -> Result<Self> {
        if dims.len() != data.ndim() {
            return Err(Error::InvalidDimensions(format!(
                "{} dimension labels for an array of rank {}",
                dims.len(),
                data.ndim()
            )));
        }

        for (axis, dim) in dims.iter().enumerate() {
            if dim.len() != data.len_of(Axis(axis)) {
                return Err(Error::InvalidDimensions(format!(
                    "dimension '{}' has {} coordinates but axis {} has length {}",
                    dim.name(),
                    dim.len(),
                    axis,
                    data.len_of(Axis(axis))
                )));
            }
            if dims[..axis].iter().any(|d| d.name() == dim.name()) {
                return Err(Error::InvalidDimensions(format!(
                    "duplicate dimension '{}'",
                    dim.name()
                )));
            }
        }

        Ok(Self {
            data,
            dims,
            attrs: Attributes::new(),
        })
    }

    /// Zero-filled field whose shape follows the coordinate lengths
    pub fn zeros(dims: Vec<Dimension>) -> Self {
        let shape: Vec<usize> = dims.iter().map(Dimension::len).collect();
        Self {
            data: ArrayD::zeros(IxDyn(&shape)),
            dims,
            attrs: Attributes::new(),
        }
    }

    /// Replace the attribute map
    pub fn with_attrs(mut self, attrs: Attributes) -> Self {
        self.attrs = attrs;
        self
    }

    // Shape

    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    pub fn ndim(&self) -> usize {
        self.data.ndim()
    }

    /// Fail with [`Error::ShapeMismatch`] unless `other` has the same shape
    pub fn ensure_same_shape(&self, other: &LabeledField) -> Result<()> {
        if self.shape() != other.shape() {
            return Err(Error::shape_mismatch(self.shape(), other.shape()));
        }
        Ok(())
    }

    // Dimensions

    pub fn dims(&self) -> &[Dimension] {
        &self.dims
    }

    /// Axis index of the named dimension
    pub fn axis(&self, name: &str) -> Result<usize> {
        self.dims
            .iter()
            .position(|d| d.name() == name)
            .ok_or_else(|| Error::MissingDimension {
                name: name.to_string(),
            })
    }

    /// The named dimension
    pub fn dim(&self, name: &str) -> Result<&Dimension> {
        Ok(&self.dims[self.axis(name)?])
    }

    /// Coordinate values of the named dimension
    pub fn coord(&self, name: &str) -> Result<&[f64]> {
        Ok(self.dim(name)?.coords())
    }

    /// Length of the named dimension
    pub fn len_of(&self, name: &str) -> Result<usize> {
        Ok(self.dim(name)?.len())
    }

    // Data

    pub fn data(&self) -> &ArrayD<f64> {
        &self.data
    }

    pub fn view(&self) -> ArrayViewD<'_, f64> {
        self.data.view()
    }

    pub fn values_mut(&mut self) -> &mut ArrayD<f64> {
        &mut self.data
    }

    pub fn into_array(self) -> ArrayD<f64> {
        self.data
    }

    // Attributes

    pub fn attrs(&self) -> &Attributes {
        &self.attrs
    }

    /// Set one attribute, replacing any existing value
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attrs.insert(key.into(), value.into());
    }

    /// Attributes present in both fields with equal values
    pub fn common_attrs(&self, other: &LabeledField) -> Attributes {
        self.attrs
            .iter()
            .filter(|(key, value)| other.attrs.get(*key) == Some(*value))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    // Selection

    /// Select the slice at position `index` along `dim`, dropping that dimension
    pub fn isel(&self, dim: &str, index: usize) -> Result<LabeledField> {
        let axis = self.axis(dim)?;
        let len = self.dims[axis].len();
        if index >= len {
            return Err(Error::InvalidParameter {
                name: "index",
                value: index.to_string(),
                reason: format!("dimension '{dim}' has length {len}"),
            });
        }

        let data = self.data.index_axis(Axis(axis), index).to_owned();
        let dims = self
            .dims
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != axis)
            .map(|(_, d)| d.clone())
            .collect();

        Ok(LabeledField {
            data,
            dims,
            attrs: self.attrs.clone(),
        })
    }

    /// Select the slice whose `dim` coordinate equals `value`, dropping that dimension
    ///
    /// Fails with [`Error::CoordinateNotFound`] if no coordinate matches and
    /// with [`Error::DuplicateCoordinate`] if more than one does.
    pub fn sel(&self, dim: &str, value: f64) -> Result<LabeledField> {
        match self.dim(dim)?.positions(value).as_slice() {
            [] => Err(Error::CoordinateNotFound {
                dim: dim.to_string(),
                value,
            }),
            &[index] => self.isel(dim, index),
            matches => Err(Error::DuplicateCoordinate {
                dim: dim.to_string(),
                value,
                count: matches.len(),
            }),
        }
    }

    /// Arrange a rank-2 field as a raster with `row_dim` along rows and
    /// `col_dim` along columns, whatever the stored axis order
    pub fn to_raster(&self, row_dim: &str, col_dim: &str) -> Result<Raster> {
        if self.ndim() != 2 {
            return Err(Error::InvalidDimensions(format!(
                "expected a rank-2 field, got rank {}",
                self.ndim()
            )));
        }
        let rows = self.axis(row_dim)?;
        let cols = self.axis(col_dim)?;
        if rows == cols {
            return Err(Error::InvalidDimensions(format!(
                "row and column dimension are both '{row_dim}'"
            )));
        }

        let grid = self
            .data
            .view()
            .permuted_axes(IxDyn(&[rows, cols]))
            .into_dimensionality::<Ix2>()?
            .to_owned();
        Ok(Raster::from_array(grid))
    }
}
