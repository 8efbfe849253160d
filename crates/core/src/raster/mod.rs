//! Raster data structures for single spatial slices

mod grid;

pub use grid::Raster;
