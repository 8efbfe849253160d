//! Cosine-latitude cell weights
//!
//! On a regular latitude/longitude mesh the area of a cell shrinks with the
//! cosine of its latitude. Each cell is weighted by `cos(lat)` and the whole
//! field is normalized so the weights sum to 1.

use ndarray::Array2;
use patcorr_core::raster::Raster;
use patcorr_core::{Algorithm, Error, Result};
use tracing::trace;

use super::reduce::nansum;

/// Parameters for weight generation
#[derive(Debug, Clone, Default)]
pub struct WeightParams {
    /// Number of longitude grid points (must be >= 0)
    pub longitude_count: i64,
}

/// Cosine-latitude weight generator
#[derive(Debug, Clone, Default)]
pub struct WeightGenerator;

impl Algorithm for WeightGenerator {
    type Input = Vec<f64>;
    type Output = Raster;
    type Params = WeightParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "SpatialWeights"
    }

    fn description(&self) -> &'static str {
        "Normalized cosine-latitude weights for a latitude/longitude grid"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        spatial_weights(&input, params.longitude_count)
    }
}

/// Build normalized cosine-latitude weights
///
/// # Arguments
/// * `latitudes` - Latitude of each grid row, in degrees
/// * `longitude_count` - Number of longitude columns
///
/// # Returns
/// Raster of shape `(latitudes.len(), longitude_count)` whose non-NaN
/// elements sum to 1. A zero `longitude_count` gives an empty raster.
///
/// # Errors
/// [`Error::InvalidParameter`] if `longitude_count` is negative.
pub fn spatial_weights(latitudes: &[f64], longitude_count: i64) -> Result<Raster> {
    let cols = usize::try_from(longitude_count).map_err(|_| Error::InvalidParameter {
        name: "longitude_count",
        value: longitude_count.to_string(),
        reason: "must be >= 0".into(),
    })?;
    Ok(latitude_weights(latitudes, cols))
}

/// [`spatial_weights`] for an already validated column count
pub fn latitude_weights(latitudes: &[f64], cols: usize) -> Raster {
    let mut weights = Array2::from_shape_fn((latitudes.len(), cols), |(row, _)| {
        latitudes[row].to_radians().cos()
    });

    // NaN latitudes stay NaN and are left out of the total
    let total = nansum(weights.iter().copied());
    weights.mapv_inplace(|w| w / total);

    trace!(rows = latitudes.len(), cols, total, "built latitude weights");
    Raster::from_array(weights)
}
