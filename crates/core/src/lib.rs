//! # patcorr core
//!
//! Field types shared by the pattern correlation algorithms.
//!
//! - `Raster`: one `(lat, lon)` slice of a field, NaN marking missing cells
//! - `LabeledField`: n-dimensional array with named coordinate dimensions and
//!   string attributes. Coordinates are `f64`; a calendar `time` axis is
//!   carried as numeric offsets from a reference date (e.g. days since
//!   1850-01-01), with the reference recorded in the attributes if needed.
//! - `Error`/`Result`: shape, dimension and parameter failures
//! - `Algorithm`: name, description and `execute(input, params)` for each routine

pub mod error;
pub mod labeled;
pub mod raster;

pub use error::{Error, Result};
pub use labeled::{Attributes, Dimension, LabeledField};
pub use raster::Raster;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::labeled::{Attributes, Dimension, LabeledField};
    pub use crate::raster::Raster;
    pub use crate::Algorithm;
}

/// A correlation or weighting routine with typed parameters.
///
/// Implementors are unit structs wrapping a free function of the same
/// routine, e.g. `PatternCorrelation` over `pattern_corr`.
pub trait Algorithm {
    /// Fields the routine consumes (a latitude list, a pair of grids or cubes)
    type Input;
    /// Weight raster, coefficient, or coefficient series
    type Output;
    /// Settings such as centering or dimension labels
    type Params: Default;
    type Error: std::error::Error;

    /// Short identifier, e.g. `"PatternCorrelation"`
    fn name(&self) -> &'static str;

    /// One-line summary of what the routine computes
    fn description(&self) -> &'static str;

    fn execute(&self, input: Self::Input, params: Self::Params) -> std::result::Result<Self::Output, Self::Error>;

    /// Run with `Params::default()`
    fn execute_default(&self, input: Self::Input) -> std::result::Result<Self::Output, Self::Error> {
        self.execute(input, Self::Params::default())
    }
}
