//! Frame-to-frame head motion measures computed from rigid-body motion parameters.
//!
//! A motion table holds one row per volume (timepoint) and six columns: three rotations
//! (Roll, Pitch, Yaw) followed by three translations. The column order is significant.

use ndarray::{s, Array1, Array2, ArrayView2, Axis};
use tracing::debug;

use std::f64::consts::PI;
use std::fmt;

use crate::error::{QcError, Result};

pub const ROTATION_COLUMNS: [&str; 3] = ["Roll", "Pitch", "Yaw"];
pub const TRANSLATION_COLUMNS: [&str; 3] = ["X", "Y", "Z"];
pub const NUM_MOTION_PARAMS: usize = 6;


/// Motion parameters of a time series, `T` rows by 6 columns.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionTable {
    pub columns: Vec<String>,
    pub data: Array2<f64>,
}

impl MotionTable {

    /// Create a motion table with the default column names Roll, Pitch, Yaw, X, Y, Z.
    pub fn new(data: Array2<f64>) -> Result<MotionTable> {
        let columns = ROTATION_COLUMNS.iter()
            .chain(TRANSLATION_COLUMNS.iter())
            .map(|c| c.to_string())
            .collect();
        MotionTable::with_columns(columns, data)
    }

    /// Create a motion table with custom column names. The first 3 columns must be the rotations.
    pub fn with_columns(columns: Vec<String>, data: Array2<f64>) -> Result<MotionTable> {
        if data.ncols() != NUM_MOTION_PARAMS {
            return Err(QcError::InvalidMotionTable(format!("expected {} columns, got {}", NUM_MOTION_PARAMS, data.ncols())));
        }
        if columns.len() != data.ncols() {
            return Err(QcError::InvalidMotionTable(format!("{} column names for {} data columns", columns.len(), data.ncols())));
        }
        Ok(MotionTable { columns, data })
    }

    pub fn num_timepoints(&self) -> usize {
        self.data.nrows()
    }

    /// The rotational parameters, first 3 columns.
    pub fn rotation(&self) -> ArrayView2<'_, f64> {
        self.data.slice(s![.., ..3])
    }

    /// The translational parameters, last 3 columns.
    pub fn translation(&self) -> ArrayView2<'_, f64> {
        self.data.slice(s![.., 3..])
    }

    /// Index of the column with the given name.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.columns.iter()
            .position(|c| c == name)
            .ok_or_else(|| QcError::MissingColumn(name.to_string()))
    }

    /// See [`calc_displacements`].
    pub fn displacements(&self) -> DisplacementReport {
        calc_displacements(self)
    }

    /// See [`convert_radian2distance`].
    pub fn radian2distance(&self, mean_radius: f64) -> Result<MotionTable> {
        convert_radian2distance(self, mean_radius)
    }
}

impl fmt::Display for MotionTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Motion table with {} timepoints and columns {:?}.", self.num_timepoints(), self.columns)
    }
}


/// Per-timepoint displacement measures. Row 0 is always zero, as there is no prior frame.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplacementReport {
    /// Framewise displacement, summed over all 6 parameters.
    pub fd: Array1<f64>,
    /// Absolute rotational displacement.
    pub ard: Array1<f64>,
    /// Absolute translational displacement.
    pub atd: Array1<f64>,
}

impl DisplacementReport {
    pub fn len(&self) -> usize {
        self.fd.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fd.is_empty()
    }
}


/// Sum of absolute first differences along time, with a leading zero so the result has one value per row.
fn summed_abs_diff(params: ArrayView2<'_, f64>) -> Array1<f64> {
    let n = params.nrows();
    let mut out = Array1::zeros(n);
    if n < 2 {
        return out;
    }
    let diff = &params.slice(s![1.., ..]) - &params.slice(s![..-1, ..]);
    out.slice_mut(s![1..]).assign(&diff.mapv(f64::abs).sum_axis(Axis(1)));
    out
}


/// Compute framewise (FD), absolute rotational (ARD) and absolute translational (ATD) displacement.
///
/// For each timepoint `t >= 1`, the measure is the sum of the absolute differences between row `t`
/// and row `t - 1`, taken over all parameters (FD), the rotations (ARD) or the translations (ATD).
/// No smoothing is applied.
///
/// # Examples
///
/// ```
/// use ndarray::array;
/// let motion = neuroqc::MotionTable::new(array![[0., 0., 0., 0., 0., 0.], [1., 0., 0., 0., 0., -2.]]).unwrap();
/// let report = neuroqc::calc_displacements(&motion);
/// assert_eq!(report.fd[1], 3.0);
/// assert_eq!(report.ard[1], 1.0);
/// assert_eq!(report.atd[1], 2.0);
/// ```
pub fn calc_displacements(motion: &MotionTable) -> DisplacementReport {
    debug!(timepoints = motion.num_timepoints(), "computing displacements");
    DisplacementReport {
        fd: summed_abs_diff(motion.data.view()),
        ard: summed_abs_diff(motion.rotation()),
        atd: summed_abs_diff(motion.translation()),
    }
}


/// Convert the rotational parameters to arc-length displacement on a sphere of radius `mean_radius`.
///
/// The columns named `Roll`, `Pitch` and `Yaw` are multiplied by `mean_radius * PI / 180`, i.e. the rotations
/// are assumed to be given in degrees. The result is in the length unit of `mean_radius`, which should match
/// the unit of the translational parameters (typically mm, with a mean head radius of about 50 mm).
///
/// Returns a new table, the input is left unchanged.
///
/// # Errors
///
/// [`QcError::MissingColumn`] if one of the three rotation columns is not present by name.
pub fn convert_radian2distance(motion: &MotionTable, mean_radius: f64) -> Result<MotionTable> {
    let factor = PI / 180.0 * mean_radius;
    let mut converted = motion.clone();
    for name in ROTATION_COLUMNS.iter() {
        let idx = motion.column_index(name)?;
        converted.data.column_mut(idx).mapv_inplace(|v| v * factor);
    }
    Ok(converted)
}
