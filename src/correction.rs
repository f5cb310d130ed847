//! Multiple-comparison correction of p-values.
//!
//! Three procedures are supported: Bonferroni, the Bonferroni-Holm step-down procedure and the
//! Benjamini-Hochberg step-up procedure for false discovery rate control. Arrays of any shape are
//! corrected as one family of tests, in row-major order, and returned in their original shape.

use ndarray::{Array, ArrayBase, Data, Dimension};
use tracing::debug;

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::{QcError, Result};


pub const CORRECTION_METHOD_NAMES: [&str; 3] = ["Bonferroni", "Bonferroni-Holm", "Benjamini-Hochberg"];


/// A multiple-comparison correction procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorrectionMethod {
    Bonferroni,
    BonferroniHolm,
    BenjaminiHochberg,
}

impl FromStr for CorrectionMethod {
    type Err = QcError;

    /// Parse one of the names "Bonferroni", "Bonferroni-Holm" or "Benjamini-Hochberg".
    fn from_str(name: &str) -> Result<CorrectionMethod> {
        match name {
            "Bonferroni" => Ok(CorrectionMethod::Bonferroni),
            "Bonferroni-Holm" => Ok(CorrectionMethod::BonferroniHolm),
            "Benjamini-Hochberg" => Ok(CorrectionMethod::BenjaminiHochberg),
            _ => Err(QcError::UnknownCorrectionMethod(name.to_string())),
        }
    }
}

impl fmt::Display for CorrectionMethod {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            CorrectionMethod::Bonferroni => CORRECTION_METHOD_NAMES[0],
            CorrectionMethod::BonferroniHolm => CORRECTION_METHOD_NAMES[1],
            CorrectionMethod::BenjaminiHochberg => CORRECTION_METHOD_NAMES[2],
        };
        write!(f, "{}", name)
    }
}


/// Order by p-value, ties by position.
fn by_pval(a: &(f64, usize), b: &(f64, usize)) -> Ordering {
    a.0.total_cmp(&b.0).then(a.1.cmp(&b.1))
}


/// Multiply every p-value by the number of tests. The result is not clipped to 1.
pub fn bonferroni(pvals: &[f64]) -> Vec<f64> {
    let n = pvals.len() as f64;
    pvals.iter().map(|p| p * n).collect()
}


/// Bonferroni-Holm: the i-th smallest p-value (0-based) is multiplied by `n - i`.
pub fn bonferroni_holm(pvals: &[f64]) -> Vec<f64> {
    let n = pvals.len();
    let mut values: Vec<(f64, usize)> = pvals.iter().copied().zip(0..n).collect();
    values.sort_by(by_pval);

    let mut corrected = vec![0.0; n];
    for (rank, (pval, idx)) in values.into_iter().enumerate() {
        corrected[idx] = (n - rank) as f64 * pval;
    }
    corrected
}


/// Benjamini-Hochberg: going from the largest p-value down, the p-value of rank `r` becomes `p * n / r`,
/// capped at the corrected value of the next larger p-value so the result is monotone in `p`.
pub fn benjamini_hochberg(pvals: &[f64]) -> Vec<f64> {
    let n = pvals.len();
    let mut values: Vec<(f64, usize)> = pvals.iter().copied().zip(0..n).collect();
    values.sort_by(by_pval);
    values.reverse();

    let mut adjusted: Vec<f64> = values.iter()
        .enumerate()
        .map(|(i, (pval, _))| (n as f64 / (n - i) as f64) * pval)
        .collect();
    for i in 1..n {
        if adjusted[i - 1] < adjusted[i] {
            adjusted[i] = adjusted[i - 1];
        }
    }

    let mut corrected = vec![0.0; n];
    for ((_, idx), value) in values.into_iter().zip(adjusted) {
        corrected[idx] = value;
    }
    corrected
}


/// Correct an array of p-values for multiple comparisons.
///
/// All elements form one family of `n` tests. The array is flattened in row-major order, corrected with the
/// given method and reshaped to its original shape.
///
/// # Examples
///
/// ```
/// use ndarray::array;
/// use neuroqc::{multicomp_pval_correction, CorrectionMethod};
///
/// let pvals = array![[0.01, 0.04], [0.03, 0.20]];
/// let corrected = multicomp_pval_correction(&pvals, CorrectionMethod::Bonferroni).unwrap();
/// assert_eq!(pvals.shape(), corrected.shape());
/// assert_eq!(0.8, corrected[[1, 1]]);
/// ```
pub fn multicomp_pval_correction<S, D>(pvals: &ArrayBase<S, D>, method: CorrectionMethod) -> Result<Array<f64, D>>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let flat: Vec<f64> = pvals.iter().copied().collect();
    debug!(%method, n = flat.len(), "correcting p-values");

    let corrected = match method {
        CorrectionMethod::Bonferroni => bonferroni(&flat),
        CorrectionMethod::BonferroniHolm => bonferroni_holm(&flat),
        CorrectionMethod::BenjaminiHochberg => benjamini_hochberg(&flat),
    };
    Ok(Array::from_shape_vec(pvals.raw_dim(), corrected)?)
}
