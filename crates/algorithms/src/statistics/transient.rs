//! Transient pattern correlation
//!
//! Correlates two `(time, lat, lon)` labeled cubes slice by slice. A single
//! cosine-latitude weight field is built from the first cube and shared by
//! every time step. Axes are found by name, so any axis order works.

use patcorr_core::labeled::{Attributes, LabeledField};
use patcorr_core::raster::Raster;
use patcorr_core::{Algorithm, Error, Result};
use tracing::{debug, trace};

use super::pattern::{pattern_corr, CellWeights};
use super::weights::latitude_weights;
use crate::strategy::ProcessingMode;

/// `description` attribute of every output series
pub const DESCRIPTION: &str = "transient pattern correlation with latitudinal weights applied";

/// `units` attribute of every output series
pub const UNITS: &str = "[-1, 1]";

/// Names of the latitude, longitude and time dimensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimLabels {
    pub lat: String,
    pub lon: String,
    pub time: String,
}

impl Default for DimLabels {
    fn default() -> Self {
        Self {
            lat: "lat".into(),
            lon: "lon".into(),
            time: "time".into(),
        }
    }
}

/// Parameters for transient pattern correlation
#[derive(Debug, Clone)]
pub struct TransientParams {
    /// Subtract weighted means before correlating (default: true)
    pub centered: bool,
    /// Dimension names (default: "lat", "lon", "time")
    pub labels: DimLabels,
    /// How time steps are scheduled (default: parallel)
    pub mode: ProcessingMode,
}

impl Default for TransientParams {
    fn default() -> Self {
        Self {
            centered: true,
            labels: DimLabels::default(),
            mode: ProcessingMode::default(),
        }
    }
}

/// Transient pattern correlation algorithm
#[derive(Debug, Clone, Default)]
pub struct TransientPatternCorrelation;

impl Algorithm for TransientPatternCorrelation {
    type Input = (LabeledField, LabeledField);
    type Output = LabeledField;
    type Params = TransientParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "TransientPatternCorrelation"
    }

    fn description(&self) -> &'static str {
        "Latitude-weighted pattern correlation at every time step of two labeled cubes"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        let (series_a, series_b) = input;
        pattern_corr_series_with(
            &series_a,
            &series_b,
            params.centered,
            &params.labels,
            params.mode,
        )
    }
}

/// Pattern correlation at every time step, processed in time order
///
/// See [`pattern_corr_series_with`].
pub fn pattern_corr_series(
    series_a: &LabeledField,
    series_b: &LabeledField,
    centered: bool,
    labels: &DimLabels,
) -> Result<LabeledField> {
    pattern_corr_series_with(series_a, series_b, centered, labels, ProcessingMode::Sequential)
}

/// Pattern correlation at every time step of two labeled cubes
///
/// For each position `t` of `series_a`'s time coordinate, the slices of both
/// cubes whose time coordinate equals that value are arranged as
/// `(lat, lon)` grids and correlated with shared cosine-latitude weights.
///
/// # Returns
/// A rank-1 field on `series_a`'s time dimension holding one coefficient per
/// step. Its attributes are those present and equal on both inputs, plus
/// `description` and `units` (which always overwrite input values).
///
/// # Errors
/// - [`Error::ShapeMismatch`] if the cubes differ in shape
/// - [`Error::InvalidDimensions`] if the cubes are not rank 3
/// - [`Error::MissingDimension`] if a label is not a dimension of either cube
/// - [`Error::CoordinateNotFound`] if `series_b` lacks one of `series_a`'s times
/// - [`Error::DuplicateCoordinate`] if a time value repeats in either cube
///
/// Any error aborts the whole series.
pub fn pattern_corr_series_with(
    series_a: &LabeledField,
    series_b: &LabeledField,
    centered: bool,
    labels: &DimLabels,
    mode: ProcessingMode,
) -> Result<LabeledField> {
    series_a.ensure_same_shape(series_b)?;
    if series_a.ndim() != 3 {
        return Err(Error::InvalidDimensions(format!(
            "expected rank-3 (time, lat, lon) fields, got rank {}",
            series_a.ndim()
        )));
    }
    for label in [&labels.lat, &labels.lon, &labels.time] {
        series_a.axis(label)?;
        series_b.axis(label)?;
    }

    let weights = latitude_weights(series_a.coord(&labels.lat)?, series_a.len_of(&labels.lon)?);

    let mut attrs: Attributes = series_a.common_attrs(series_b);
    attrs.insert("description".into(), DESCRIPTION.into());
    attrs.insert("units".into(), UNITS.into());

    let time = series_a.dim(&labels.time)?;
    let mut output = LabeledField::zeros(vec![time.clone()]).with_attrs(attrs);

    debug!(
        steps = time.len(),
        centered,
        ?mode,
        "computing transient pattern correlation"
    );

    let coefficients = mode.try_map(0..time.len(), |t| {
        let stamp = time.coords()[t];
        let grid_a = time_slice(series_a, labels, stamp)?;
        let grid_b = time_slice(series_b, labels, stamp)?;
        let r = pattern_corr(&grid_a, &grid_b, CellWeights::Supplied(&weights), centered)?;
        trace!(step = t, time = stamp, r, "pattern correlation");
        Ok(r)
    })?;

    for (slot, r) in output.values_mut().iter_mut().zip(coefficients) {
        *slot = r;
    }

    Ok(output)
}

/// `(lat, lon)` grid of `series` at time coordinate `stamp`
fn time_slice(series: &LabeledField, labels: &DimLabels, stamp: f64) -> Result<Raster> {
    series
        .sel(&labels.time, stamp)?
        .to_raster(&labels.lat, &labels.lon)
}
