//! # patcorr algorithms
//!
//! Spatial pattern correlation between gridded fields.
//!
//! ## Available Algorithm Categories
//!
//! - **statistics::weights**: cosine-latitude cell weights
//! - **statistics::pattern**: weighted (optionally centered) Pearson correlation of two grids
//! - **statistics::transient**: per-time-step pattern correlation of two labeled cubes

pub mod statistics;
pub mod strategy;

mod maybe_rayon;

pub use strategy::ProcessingMode;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::statistics::{
        nansum, pattern_corr, pattern_corr_series, pattern_corr_series_with, spatial_weights,
        CellWeights, DimLabels, PatternCorrelation, PatternParams, TransientParams,
        TransientPatternCorrelation, WeightGenerator, WeightParams,
    };
    pub use crate::strategy::ProcessingMode;
    pub use patcorr_core::prelude::*;
}
