//! Global BOLD signal properties of a 4D (x, y, z, time) functional image.

use ndarray::{s, Array1, Array2, ArrayBase, Axis, Data, Ix4};
use tracing::debug;

use crate::coords::CoordinateSet;
use crate::error::Result;
use crate::util::{mean_or_nan, population_std};


/// Per-timepoint global signal measures.
#[derive(Debug, Clone, PartialEq)]
pub struct BoldReport {
    /// Root mean square of the frame-to-frame intensity change over all voxels. The first value is NaN.
    pub dvgs: Array1<f64>,
    /// Standard deviation across the sampled voxels.
    pub sdgs: Array1<f64>,
    /// Global signal, the mean across the sampled voxels.
    pub gs: Array1<f64>,
}

impl BoldReport {
    pub fn len(&self) -> usize {
        self.dvgs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dvgs.is_empty()
    }
}


/// Root mean square of the voxel-wise frame-to-frame difference, with a leading NaN.
///
/// The result has one value per timepoint. There is no difference for the first frame, so `dvgs[0]` is NaN.
pub fn calc_dvgs<S>(img: &ArrayBase<S, Ix4>) -> Array1<f64>
where
    S: Data<Elem = f64>,
{
    let num_frames = img.len_of(Axis(3));
    let mut dvgs = Array1::from_elem(num_frames, f64::NAN);
    if num_frames < 2 {
        return dvgs;
    }
    let diff = &img.slice(s![.., .., .., 1..]) - &img.slice(s![.., .., .., ..-1]);
    for (t, frame) in diff.axis_iter(Axis(3)).enumerate() {
        dvgs[t + 1] = mean_or_nan(&frame.mapv(|d| d * d)).sqrt();
    }
    dvgs
}


/// Compute the global BOLD signal properties DVgs, SDgs and GS.
///
/// DVgs is computed over all voxels of the image. SDgs and GS are computed over the voxels given in `coords`,
/// whose full time series are also returned as a matrix with one row per coordinate and one column per timepoint.
/// Standard deviations are population standard deviations. With an empty coordinate set, SDgs and GS are NaN.
///
/// # Errors
///
/// [`crate::QcError::OutOfBounds`] if any coordinate lies outside the spatial extent of `img`.
pub fn calc_bold_properties<S>(img: &ArrayBase<S, Ix4>, coords: &CoordinateSet) -> Result<(BoldReport, Array2<f64>)>
where
    S: Data<Elem = f64>,
{
    let (nx, ny, nz, nt) = img.dim();
    let indices = coords.checked_indices([nx, ny, nz])?;
    debug!(voxels = indices.len(), timepoints = nt, "computing BOLD properties");

    let mut vw_intensity = Array2::zeros((indices.len(), nt));
    for (row, [i, j, k]) in indices.iter().enumerate() {
        vw_intensity.row_mut(row).assign(&img.slice(s![*i, *j, *k, ..]));
    }

    let sdgs = vw_intensity.axis_iter(Axis(1)).map(|col| population_std(&col)).collect::<Array1<f64>>();
    let gs = vw_intensity.axis_iter(Axis(1)).map(|col| mean_or_nan(&col)).collect::<Array1<f64>>();

    let report = BoldReport {
        dvgs: calc_dvgs(img),
        sdgs,
        gs,
    };
    Ok((report, vw_intensity))
}


/// Spatial standard deviation (SDgs) of each volume, ignoring voxels that are exactly zero.
///
/// Zero voxels are treated as background outside the brain mask. A volume that is entirely zero yields NaN.
pub fn calc_std<S>(img: &ArrayBase<S, Ix4>) -> Array1<f64>
where
    S: Data<Elem = f64>,
{
    img.axis_iter(Axis(3))
        .map(|vol| {
            let nonzero: Array1<f64> = vol.iter().copied().filter(|&v| v != 0.0).collect();
            population_std(&nonzero)
        })
        .collect()
}


#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array4};

    /// A 2x2x1 volume with 3 frames.
    fn demo_image() -> Array4<f64> {
        let mut img = Array4::zeros((2, 2, 1, 3));
        img.slice_mut(s![0, 0, 0, ..]).assign(&array![1.0, 2.0, 4.0]);
        img.slice_mut(s![1, 0, 0, ..]).assign(&array![3.0, 3.0, 3.0]);
        img.slice_mut(s![0, 1, 0, ..]).assign(&array![5.0, 4.0, 6.0]);
        img.slice_mut(s![1, 1, 0, ..]).assign(&array![0.0, 0.0, 2.0]);
        img
    }

    #[test]
    fn dvgs_starts_with_nan_and_is_non_negative() {
        let dvgs = calc_dvgs(&demo_image());
        assert_eq!(3, dvgs.len());
        assert!(dvgs[0].is_nan());
        // squared diffs t1: 1, 0, 1, 0 -> mean 0.5; t2: 4, 0, 4, 4 -> mean 3
        assert_abs_diff_eq!(dvgs[1], 0.5f64.sqrt(), epsilon = 1e-12);
        assert_abs_diff_eq!(dvgs[2], 3.0f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn bold_properties_are_computed_over_the_given_voxels() {
        let coords = CoordinateSet::from(vec![[0, 0, 0], [1, 0, 0]]);
        let (report, ts) = calc_bold_properties(&demo_image(), &coords).unwrap();

        assert_eq!((2, 3), ts.dim());
        assert_eq!(array![3.0, 3.0, 3.0], ts.row(1));
        assert_abs_diff_eq!(report.gs, array![2.0, 2.5, 3.5], epsilon = 1e-12);
        assert_abs_diff_eq!(report.sdgs, array![1.0, 0.5, 0.5], epsilon = 1e-12);
        assert_eq!(3, report.len());
        assert!(report.dvgs[0].is_nan());
    }

    #[test]
    fn out_of_bounds_coordinates_are_rejected() {
        let coords = CoordinateSet::from([2, 0, 0]);
        assert!(calc_bold_properties(&demo_image(), &coords).is_err());
    }

    #[test]
    fn empty_coordinate_sets_give_nan_statistics() {
        let (report, ts) = calc_bold_properties(&demo_image(), &CoordinateSet::default()).unwrap();
        assert_eq!((0, 3), ts.dim());
        assert!(report.gs.iter().all(|v| v.is_nan()));
        assert!(report.sdgs.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn spatial_std_ignores_zero_voxels() {
        let sdgs = calc_std(&demo_image());
        assert_eq!(3, sdgs.len());
        // frame 0 non-zero values: 1, 3, 5 -> population std sqrt(8/3)
        assert_abs_diff_eq!(sdgs[0], (8.0f64 / 3.0).sqrt(), epsilon = 1e-12);
        // frame 2: 4, 3, 6, 2 -> mean 3.75, variance 2.1875
        assert_abs_diff_eq!(sdgs[2], 2.1875f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn spatial_std_of_an_empty_volume_is_nan() {
        let img: Array4<f64> = Array4::zeros((2, 2, 2, 2));
        assert!(calc_std(&img).iter().all(|v| v.is_nan()));
    }
}
