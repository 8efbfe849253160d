//! Weighted pattern correlation
//!
//! Pearson correlation between two grids where every cell contributes in
//! proportion to its weight:
//!
//! ```text
//! r = Σ w·a·b / sqrt(Σ w·a² · Σ w·b²)
//! ```
//!
//! In centered mode `a` and `b` are first replaced by their deviations from
//! the weighted means `Σ w·a` and `Σ w·b`. Uncentered mode correlates the raw
//! values (a weighted cosine similarity). All sums skip NaN terms.

use ndarray::{Array2, ArrayView2, CowArray};
use patcorr_core::raster::Raster;
use patcorr_core::{Algorithm, Error, Result};

use super::reduce::{weighted_nansum, weighted_product_nansum};

/// Cell weights used by [`pattern_corr`]
#[derive(Debug, Clone, Copy, Default)]
pub enum CellWeights<'a> {
    /// Every cell weighs `1 / cell_count`
    #[default]
    Uniform,
    /// Caller-supplied weights, same shape as the grids
    Supplied(&'a Raster),
}

impl<'a> From<Option<&'a Raster>> for CellWeights<'a> {
    fn from(weights: Option<&'a Raster>) -> Self {
        weights.map_or(CellWeights::Uniform, CellWeights::Supplied)
    }
}

/// Parameters for pattern correlation
#[derive(Debug, Clone)]
pub struct PatternParams {
    /// Subtract weighted means before correlating (default: true)
    pub centered: bool,
    /// Cell weights; `None` means uniform
    pub weights: Option<Raster>,
}

impl Default for PatternParams {
    fn default() -> Self {
        Self {
            centered: true,
            weights: None,
        }
    }
}

/// Pattern correlation algorithm
#[derive(Debug, Clone, Default)]
pub struct PatternCorrelation;

impl Algorithm for PatternCorrelation {
    type Input = (Raster, Raster);
    type Output = f64;
    type Params = PatternParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "PatternCorrelation"
    }

    fn description(&self) -> &'static str {
        "Weighted, optionally centered, Pearson correlation between two grids"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        let (grid_a, grid_b) = input;
        pattern_corr(
            &grid_a,
            &grid_b,
            params.weights.as_ref().into(),
            params.centered,
        )
    }
}

/// Compute the weighted pattern correlation of two grids
///
/// The inputs are never modified; centering works on private copies.
///
/// # Arguments
/// * `grid_a`, `grid_b` - Grids of identical shape, NaN marks missing cells
/// * `weights` - Uniform, or a weight raster of the same shape
/// * `centered` - Subtract the weighted mean of each grid first
///
/// # Returns
/// The correlation coefficient. Degenerate inputs (constant grids, all-NaN
/// grids) give NaN or ±Inf rather than an error.
///
/// # Errors
/// [`Error::ShapeMismatch`] if the grids differ in shape, or if supplied
/// weights differ in shape from the grids.
pub fn pattern_corr(
    grid_a: &Raster,
    grid_b: &Raster,
    weights: CellWeights<'_>,
    centered: bool,
) -> Result<f64> {
    grid_a.ensure_same_shape(grid_b)?;

    let uniform;
    let w: ArrayView2<'_, f64> = match weights {
        CellWeights::Supplied(supplied) => {
            grid_a.ensure_same_shape(supplied)?;
            supplied.view()
        }
        CellWeights::Uniform => {
            uniform = Array2::from_elem(grid_a.shape(), 1.0 / grid_a.len() as f64);
            uniform.view()
        }
    };

    let (a, b) = if centered {
        (
            CowArray::from(center(grid_a, w)),
            CowArray::from(center(grid_b, w)),
        )
    } else {
        (CowArray::from(grid_a.view()), CowArray::from(grid_b.view()))
    };

    let numerator = weighted_product_nansum(a.view(), b.view(), w);
    let sum_sq_a = weighted_product_nansum(a.view(), a.view(), w);
    let sum_sq_b = weighted_product_nansum(b.view(), b.view(), w);
    let denominator = (sum_sq_a * sum_sq_b).sqrt();

    Ok(numerator / denominator)
}

/// Copy of `grid` minus its weighted mean
fn center(grid: &Raster, weights: ArrayView2<'_, f64>) -> Array2<f64> {
    let mean = weighted_nansum(grid.view(), weights);
    grid.data() - mean
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statistics::weights::spatial_weights;
    use approx::assert_relative_eq;
    use ndarray::array;

    fn wave(rows: usize, cols: usize) -> Raster {
        let data = Array2::from_shape_fn((rows, cols), |(r, c)| {
            (r as f64 * 0.7).sin() + (c as f64 * 0.3).cos() * 2.0 + 5.0
        });
        Raster::from_array(data)
    }

    fn lat_weights(rows: usize, cols: usize) -> Raster {
        let lats: Vec<f64> = (0..rows)
            .map(|i| -80.0 + 160.0 * i as f64 / (rows - 1) as f64)
            .collect();
        spatial_weights(&lats, cols as i64).unwrap()
    }

    #[test]
    fn test_self_correlation_is_one() {
        let x = wave(9, 12);
        let w = lat_weights(9, 12);
        let r = pattern_corr(&x, &x, CellWeights::Supplied(&w), true).unwrap();
        assert_relative_eq!(r, 1.0, epsilon = 1e-12);

        let r = pattern_corr(&x, &x, CellWeights::Uniform, true).unwrap();
        assert_relative_eq!(r, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_anti_correlation_is_minus_one() {
        let x = wave(9, 12);
        let neg = Raster::from_array(-x.data());
        let w = lat_weights(9, 12);
        let r = pattern_corr(&x, &neg, CellWeights::Supplied(&w), true).unwrap();
        assert_relative_eq!(r, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_symmetric() {
        let a = wave(6, 8);
        let b = Raster::from_array(a.data().mapv(|v| v * v - 3.0 * v));
        let w = lat_weights(6, 8);
        for centered in [true, false] {
            let ab = pattern_corr(&a, &b, CellWeights::Supplied(&w), centered).unwrap();
            let ba = pattern_corr(&b, &a, CellWeights::Supplied(&w), centered).unwrap();
            assert_eq!(ab, ba);
        }
    }

    #[test]
    fn test_shape_mismatch() {
        let a = Raster::from_array(Array2::from_elem((3, 3), 1.0));
        let b = Raster::from_array(Array2::from_elem((2, 2), 1.0));
        let err = pattern_corr(&a, &b, CellWeights::Uniform, true).unwrap_err();
        assert_eq!(
            err,
            Error::ShapeMismatch {
                expected: vec![3, 3],
                actual: vec![2, 2],
            }
        );
    }

    #[test]
    fn test_weight_shape_mismatch() {
        let a = wave(3, 3);
        let w = lat_weights(3, 4);
        let err = pattern_corr(&a, &a, CellWeights::Supplied(&w), true).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { .. }));
    }

    #[test]
    fn test_centered_differs_from_uncentered() {
        let a = Raster::from_array(array![[1.0, 2.0], [3.0, 4.0]]);
        let b = Raster::from_array(array![[4.0, 3.0], [2.0, 1.0]]);
        let centered = pattern_corr(&a, &b, CellWeights::Uniform, true).unwrap();
        let uncentered = pattern_corr(&a, &b, CellWeights::Uniform, false).unwrap();
        assert_relative_eq!(centered, -1.0, epsilon = 1e-12);
        assert_relative_eq!(uncentered, 20.0 / 30.0, epsilon = 1e-12);
        assert!((centered - uncentered).abs() > 1.0);
    }

    #[test]
    fn test_inputs_not_mutated() {
        let a = Raster::from_array(array![[1.0, 2.0], [3.0, 4.0]]);
        let b = Raster::from_array(array![[4.0, 3.0], [2.0, 1.0]]);
        let (a0, b0) = (a.clone(), b.clone());
        pattern_corr(&a, &b, CellWeights::Uniform, true).unwrap();
        assert_eq!(a, a0);
        assert_eq!(b, b0);
    }

    #[test]
    fn test_nan_skipped_only_at_reduction() {
        let a = Raster::from_array(array![[1.0, f64::NAN], [3.0, 4.0]]);
        let b = Raster::from_array(array![[2.0, 5.0], [6.0, 8.0]]);
        let r = pattern_corr(&a, &b, CellWeights::Uniform, false).unwrap();
        // b's missing-in-a cell still counts in Σ w·b²
        assert_relative_eq!(r, 13.0 / (6.5_f64 * 32.25).sqrt(), epsilon = 1e-12);
        assert!(r < 1.0);
    }

    #[test]
    fn test_constant_grid_is_nan() {
        let a = Raster::from_array(Array2::from_elem((2, 2), 2.0));
        let b = Raster::from_array(array![[1.0, 2.0], [3.0, 4.0]]);
        let r = pattern_corr(&a, &b, CellWeights::Uniform, true).unwrap();
        assert!(r.is_nan());
    }

    #[test]
    fn test_all_nan_is_nan() {
        let a = Raster::from_array(Array2::from_elem((2, 2), f64::NAN));
        let r = pattern_corr(&a, &a, CellWeights::Uniform, false).unwrap();
        assert!(r.is_nan());
    }

    #[test]
    fn test_uniform_matches_explicit_uniform() {
        let a = wave(4, 4);
        let b = Raster::from_array(a.data().mapv(f64::ln));
        let w = Raster::from_array(Array2::from_elem((4, 4), 1.0 / 16.0));
        let implicit = pattern_corr(&a, &b, CellWeights::default(), true).unwrap();
        let explicit = pattern_corr(&a, &b, CellWeights::Supplied(&w), true).unwrap();
        assert_eq!(implicit, explicit);
    }

    #[test]
    fn test_algorithm_interface() {
        let a = Raster::from_array(array![[1.0, 2.0], [3.0, 4.0]]);
        let b = Raster::from_array(array![[4.0, 3.0], [2.0, 1.0]]);
        let algo = PatternCorrelation;
        let centered = algo.execute_default((a.clone(), b.clone())).unwrap();
        assert_relative_eq!(centered, -1.0, epsilon = 1e-12);

        let params = PatternParams {
            centered: false,
            weights: Some(Raster::from_array(Array2::from_elem((2, 2), 0.25))),
        };
        let uncentered = algo.execute((a, b), params).unwrap();
        assert_relative_eq!(uncentered, 2.0 / 3.0, epsilon = 1e-12);
    }
}
