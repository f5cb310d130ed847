//! Extraction of ROI time series from randomly sampled voxels.
//!
//! Repeated sampling with a fixed number of voxels gives Monte-Carlo estimates of how stable a
//! ROI-averaged signal is under voxel subsampling.

use ndarray::{s, Array1, Array2, ArrayBase, Axis, Data, Ix4};
use rand::seq::index;
use rand::Rng;
use tracing::{debug, trace};

use crate::coords::CoordinateSet;
use crate::error::{QcError, Result};


/// Number of voxels drawn per sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoxelCount {
    /// Use as many voxels as there are coordinates.
    Max,
    Count(usize),
}

impl VoxelCount {
    fn resolve(&self, available: usize) -> usize {
        match self {
            VoxelCount::Max => available,
            VoxelCount::Count(n) => *n,
        }
    }
}


/// Settings for [`extract_ts_from_coordinates`].
#[derive(Debug, Clone, PartialEq)]
pub struct SamplingConfig {
    pub n_voxels: VoxelCount,
    /// Number of independent draws. `None` means a single draw, returned as a plain time series.
    pub iters: Option<usize>,
    /// Whether voxels are drawn with replacement.
    pub replace: bool,
}

impl Default for SamplingConfig {
    fn default() -> SamplingConfig {
        SamplingConfig {
            n_voxels: VoxelCount::Max,
            iters: None,
            replace: false,
        }
    }
}

impl SamplingConfig {
    pub fn with_n_voxels(mut self, n_voxels: VoxelCount) -> SamplingConfig {
        self.n_voxels = n_voxels;
        self
    }

    pub fn with_iters(mut self, iters: usize) -> SamplingConfig {
        self.iters = Some(iters);
        self
    }

    pub fn with_replacement(mut self, replace: bool) -> SamplingConfig {
        self.replace = replace;
        self
    }
}


/// Result of [`extract_ts_from_coordinates`].
#[derive(Debug, Clone, PartialEq)]
pub enum RoiTimeSeries {
    /// Mean time series of a single draw, shape `(T,)`.
    Mean(Array1<f64>),
    /// One mean time series per draw in the columns, shape `(T, iters)`.
    Resampled(Array2<f64>),
}

impl RoiTimeSeries {
    pub fn shape(&self) -> &[usize] {
        match self {
            RoiTimeSeries::Mean(ts) => ts.shape(),
            RoiTimeSeries::Resampled(ts) => ts.shape(),
        }
    }

    pub fn num_timepoints(&self) -> usize {
        self.shape()[0]
    }
}


/// Draw `amount` indices from `0..available`. Indices drawn without replacement are sorted.
fn draw_indices<R>(rng: &mut R, available: usize, amount: usize, replace: bool) -> Result<Vec<usize>>
where
    R: Rng + ?Sized,
{
    if amount == 0 {
        return Err(QcError::EmptySample);
    }
    if replace {
        if available == 0 {
            return Err(QcError::EmptySample);
        }
        let mut drawn: Vec<usize> = (0..amount).map(|_| rng.gen_range(0..available)).collect();
        drawn.sort_unstable();
        Ok(drawn)
    } else {
        if amount > available {
            return Err(QcError::SamplingInfeasible(amount, available));
        }
        let mut drawn = index::sample(rng, available, amount).into_vec();
        drawn.sort_unstable();
        Ok(drawn)
    }
}


/// Mean over the time series of the selected voxels.
fn mean_time_series<S>(img: &ArrayBase<S, Ix4>, voxels: &[[usize; 3]], selection: &[usize]) -> Array1<f64>
where
    S: Data<Elem = f64>,
{
    let mut sum: Array1<f64> = Array1::zeros(img.len_of(Axis(3)));
    for &sel in selection {
        let [i, j, k] = voxels[sel];
        sum += &img.slice(s![i, j, k, ..]);
    }
    sum / selection.len() as f64
}


/// Extract the mean time series of randomly sampled voxels from a ROI.
///
/// `coords` lists all candidate voxels of the ROI; a single coordinate is accepted as well. Each draw picks
/// `config.n_voxels` of them uniformly at random (without replacement unless `config.replace` is set)
/// and averages their time series. With `config.iters == None` the single mean series of length `T` is returned,
/// otherwise `iters` independent draws are stacked as the columns of a `(T, iters)` matrix.
///
/// All randomness comes from `rng`; pass a seeded generator for reproducible results.
///
/// # Errors
///
/// * [`QcError::OutOfBounds`] if a coordinate lies outside the image.
/// * [`QcError::SamplingInfeasible`] if more voxels than coordinates are requested without replacement.
/// * [`QcError::EmptySample`] if a draw would contain no voxels.
/// * [`QcError::InvalidParameter`] if `config.iters` is `Some(0)`.
///
/// # Examples
///
/// ```
/// use ndarray::Array4;
/// use rand::{rngs::StdRng, SeedableRng};
/// use neuroqc::{extract_ts_from_coordinates, SamplingConfig, VoxelCount};
///
/// let img = Array4::<f64>::ones((4, 4, 4, 10));
/// let roi = vec![[0, 0, 0], [1, 1, 1], [2, 2, 2], [3, 3, 3]];
/// let config = SamplingConfig::default().with_n_voxels(VoxelCount::Count(2)).with_iters(5);
/// let ts = extract_ts_from_coordinates(&img, roi, &config, &mut StdRng::seed_from_u64(42)).unwrap();
/// assert_eq!(&[10, 5], ts.shape());
/// ```
pub fn extract_ts_from_coordinates<S, C, R>(img: &ArrayBase<S, Ix4>, coords: C, config: &SamplingConfig, rng: &mut R) -> Result<RoiTimeSeries>
where
    S: Data<Elem = f64>,
    C: Into<CoordinateSet>,
    R: Rng + ?Sized,
{
    let coords: CoordinateSet = coords.into();
    let (nx, ny, nz, nt) = img.dim();
    let voxels = coords.checked_indices([nx, ny, nz])?;
    let n_voxels = config.n_voxels.resolve(voxels.len());
    debug!(candidates = voxels.len(), n_voxels, iters = ?config.iters, replace = config.replace, "sampling ROI voxels");

    match config.iters {
        None => {
            let selection = draw_indices(rng, voxels.len(), n_voxels, config.replace)?;
            Ok(RoiTimeSeries::Mean(mean_time_series(img, &voxels, &selection)))
        }
        Some(0) => Err(QcError::InvalidParameter("iters", String::from("must be at least 1"))),
        Some(iters) => {
            let mut result = Array2::zeros((nt, iters));
            for (iter, mut column) in result.axis_iter_mut(Axis(1)).enumerate() {
                let selection = draw_indices(rng, voxels.len(), n_voxels, config.replace)?;
                trace!(iter, drawn = selection.len(), "voxel draw");
                column.assign(&mean_time_series(img, &voxels, &selection));
            }
            Ok(RoiTimeSeries::Resampled(result))
        }
    }
}
