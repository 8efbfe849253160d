//! NaN-ignoring reductions
//!
//! Elementwise products propagate NaN as usual; only the final sum skips NaN
//! terms. A cell that is missing in any operand therefore drops out of that
//! one sum, but still counts in sums that do not involve the missing operand.
//!
//! Terms are accumulated left to right in iteration order. numpy's `nansum`
//! sums pairwise, so results can differ from it in the last few bits.

use ndarray::{ArrayView2, Zip};

/// Sum of all non-NaN values. An empty or all-NaN input sums to 0.
pub fn nansum<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    values
        .into_iter()
        .filter(|v| !v.is_nan())
        .fold(0.0, |acc, v| acc + v)
}

/// `nansum(values * weights)`
///
/// Both views must have the same shape.
pub fn weighted_nansum(values: ArrayView2<'_, f64>, weights: ArrayView2<'_, f64>) -> f64 {
    Zip::from(&values)
        .and(&weights)
        .fold(0.0, |acc, &v, &w| skip_nan(acc, v * w))
}

/// `nansum(a * b * weights)`
///
/// All three views must have the same shape. Passing the same view as `a` and
/// `b` gives the weighted sum of squares.
pub fn weighted_product_nansum(
    a: ArrayView2<'_, f64>,
    b: ArrayView2<'_, f64>,
    weights: ArrayView2<'_, f64>,
) -> f64 {
    Zip::from(&a)
        .and(&b)
        .and(&weights)
        .fold(0.0, |acc, &x, &y, &w| skip_nan(acc, x * y * w))
}

#[inline]
fn skip_nan(acc: f64, term: f64) -> f64 {
    if term.is_nan() { acc } else { acc + term }
}
