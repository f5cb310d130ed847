//! Rescaling of time courses and images.

use ndarray::{Array, Array1, ArrayBase, Data, Dimension, Ix1};

use crate::error::{QcError, Result};
use crate::util::{mean_or_nan, population_std, round_to_decimals};


/// Z-score normalize a 1D time course: `(x - mean) / std`, with the population standard deviation.
///
/// The input may have any number of dimensions, but only 1D data can be normalized. A constant time course
/// yields non-finite values.
///
/// # Errors
///
/// [`QcError::InvalidDimension`] if `data` is not one-dimensional.
///
/// # Examples
///
/// ```
/// use ndarray::array;
/// let z = neuroqc::by_std(&array![1.0, 2.0, 3.0].into_dyn()).unwrap();
/// assert_eq!(0.0, z[1]);
/// assert!(neuroqc::by_std(&array![[1.0, 2.0]]).is_err());
/// ```
pub fn by_std<S, D>(data: &ArrayBase<S, D>) -> Result<Array1<f64>>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let data = data.view()
        .into_dimensionality::<Ix1>()
        .map_err(|_| QcError::InvalidDimension(1, data.ndim()))?;
    let mean = mean_or_nan(&data);
    let std = population_std(&data);
    Ok(data.mapv(|v| (v - mean) / std))
}


/// Settings for [`mode_norm`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeNorm {
    /// The value the data mean is mapped to.
    pub mode: f64,
    pub decimals: i32,
}

impl Default for ModeNorm {
    fn default() -> ModeNorm {
        ModeNorm {
            mode: 1000.0,
            decimals: 3,
        }
    }
}

impl ModeNorm {
    /// See [`mode_norm`].
    pub fn apply<S, D>(&self, data: &ArrayBase<S, D>) -> Result<Array<f64, D>>
    where
        S: Data<Elem = f64>,
        D: Dimension,
    {
        mode_norm(data, self.mode, self.decimals)
    }
}


/// Rescale data so that its mean maps to `mode`, then round to `decimals` decimal places.
///
/// Computes `(x - mean) * (mode / mean) + mode`, so relative differences to the mean are preserved.
/// Works on data of any dimensionality, e.g. a whole 4D image. Rounding ties go to the even neighbour.
/// Data with a zero mean yields non-finite values.
///
/// # Errors
///
/// [`QcError::EmptyInput`] if `data` has no elements.
pub fn mode_norm<S, D>(data: &ArrayBase<S, D>, mode: f64, decimals: i32) -> Result<Array<f64, D>>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    if data.is_empty() {
        return Err(QcError::EmptyInput);
    }
    let mean = mean_or_nan(data);
    let scale = mode / mean;
    Ok(data.mapv(|v| round_to_decimals((v - mean) * scale + mode, decimals)))
}
