//! Utility functions used in all other neuroqc modules.

use ndarray::{ArrayBase, Data, Dimension};
use ndarray_stats::SummaryStatisticsExt;


/// Population standard deviation (normalized by `n`, not `n - 1`) of all elements.
/// Returns NaN for empty input, like the mean and std of nothing in numeric array libraries.
pub fn population_std<S, D>(data: &ArrayBase<S, D>) -> f64
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    data.central_moment(2)
        .map(f64::sqrt)
        .unwrap_or(f64::NAN)
}


/// Arithmetic mean of all elements, NaN for empty input.
pub fn mean_or_nan<S, D>(data: &ArrayBase<S, D>) -> f64
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    SummaryStatisticsExt::mean(data).unwrap_or(f64::NAN)
}


/// Round to the given number of decimal places. Ties go to the even neighbour.
pub fn round_to_decimals(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}
