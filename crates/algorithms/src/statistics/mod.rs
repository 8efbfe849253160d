//! Statistical analysis algorithms for gridded fields
//!
//! - **reduce**: NaN-ignoring weighted sums
//! - **weights**: Cosine-latitude cell weights
//! - **pattern**: Weighted pattern correlation of two grids
//! - **transient**: Pattern correlation per time step of two labeled cubes

pub mod pattern;
pub mod reduce;
pub mod transient;
pub mod weights;

pub use pattern::{pattern_corr, CellWeights, PatternCorrelation, PatternParams};
pub use reduce::{nansum, weighted_nansum, weighted_product_nansum};
pub use transient::{
    pattern_corr_series, pattern_corr_series_with, DimLabels, TransientParams,
    TransientPatternCorrelation, DESCRIPTION, UNITS,
};
pub use weights::{latitude_weights, spatial_weights, WeightGenerator, WeightParams};
