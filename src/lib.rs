//! Quality-control metrics for functional MRI time series.
//!
//! The crate computes motion-derived displacement measures, global BOLD signal statistics,
//! ROI time series from randomly sampled voxels, voxel neighbourhoods, simple normalizations and
//! multiple-comparison corrected p-values. All functions are pure transforms over in-memory
//! `ndarray` arrays; 4D images are indexed as `(x, y, z, time)`.

pub mod bold;
pub mod cluster;
pub mod coords;
pub mod correction;
pub mod error;
pub mod motion;
pub mod normalization;
pub mod sampling;
pub mod util;

pub use bold::{calc_bold_properties, calc_dvgs, calc_std, BoldReport};
pub use cluster::{euclidean_distance, get_cluster_coordinates, get_cluster_coordinates_nn, Connectivity};
pub use coords::{Coordinate, CoordinateSet};
pub use correction::{multicomp_pval_correction, CorrectionMethod};
pub use error::{QcError, Result};
pub use motion::{calc_displacements, convert_radian2distance, DisplacementReport, MotionTable};
pub use normalization::{by_std, mode_norm, ModeNorm};
pub use sampling::{extract_ts_from_coordinates, RoiTimeSeries, SamplingConfig, VoxelCount};
