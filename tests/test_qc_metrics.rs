use approx::assert_abs_diff_eq;
use ndarray::{array, s, Array2, Array4};
use rand::rngs::StdRng;
use rand::SeedableRng;

use neuroqc::{
    calc_bold_properties, calc_displacements, calc_std, convert_radian2distance, extract_ts_from_coordinates,
    get_cluster_coordinates, multicomp_pval_correction, by_std, Connectivity, CorrectionMethod, CoordinateSet,
    MotionTable, RoiTimeSeries, SamplingConfig, VoxelCount,
};

/// A 6x6x6 volume with 8 frames: a constant 100 background inside a zero border, plus a slow drift.
fn demo_image() -> Array4<f64> {
    let mut img = Array4::zeros((6, 6, 6, 8));
    for t in 0..8 {
        img.slice_mut(s![1..5, 1..5, 1..5, t]).fill(100.0 + t as f64);
    }
    img[[2, 2, 2, 4]] = 130.0;
    img
}

#[test]
fn motion_in_degrees_is_converted_before_computing_displacements() {
    let data = Array2::from_shape_fn((10, 6), |(t, c)| if c < 3 { 0.1 * t as f64 } else { 0.05 * t as f64 });
    let motion = MotionTable::new(data).unwrap();
    let converted = convert_radian2distance(&motion, 50.0).unwrap();
    let report = calc_displacements(&converted);

    assert_eq!(10, report.len());
    assert_eq!(0.0, report.fd[0]);
    let arc = 0.1 * std::f64::consts::PI / 180.0 * 50.0;
    for t in 1..10 {
        assert_abs_diff_eq!(report.ard[t], 3.0 * arc, epsilon = 1e-9);
        assert_abs_diff_eq!(report.atd[t], 0.15, epsilon = 1e-9);
        assert_abs_diff_eq!(report.fd[t], report.ard[t] + report.atd[t], epsilon = 1e-12);
    }
}

#[test]
fn bold_metrics_of_a_cluster_roi() {
    let img = demo_image();
    let roi = CoordinateSet::from(get_cluster_coordinates([2, 2, 2], 1, Connectivity::Faces, None));
    let (report, ts) = calc_bold_properties(&img, &roi).unwrap();

    assert_eq!((7, 8), ts.dim());
    assert_eq!(8, report.len());
    assert!(report.dvgs[0].is_nan());
    assert!(report.dvgs.iter().skip(1).all(|&v| v >= 0.0));

    // Only the spike voxel differs from the others at t = 4.
    assert_abs_diff_eq!(report.gs[0], 100.0, epsilon = 1e-12);
    assert_abs_diff_eq!(report.sdgs[0], 0.0, epsilon = 1e-12);
    assert!(report.sdgs[4] > 0.0);
    assert!(report.dvgs[4] > report.dvgs[1]);

    let sdgs = calc_std(&img);
    assert_abs_diff_eq!(sdgs[0], 0.0, epsilon = 1e-12);
    assert!(sdgs[4] > 0.0);
}

#[test]
fn resampled_roi_time_series_has_one_column_per_iteration() {
    let img = demo_image();
    let roi = get_cluster_coordinates([2, 2, 2], 1, Connectivity::FacesEdgesCorners, None);
    let mut rng = StdRng::seed_from_u64(2024);

    let single = extract_ts_from_coordinates(&img, roi.clone(), &SamplingConfig::default(), &mut rng).unwrap();
    assert_eq!(&[8], single.shape());

    let config = SamplingConfig::default().with_n_voxels(VoxelCount::Count(5)).with_iters(5);
    match extract_ts_from_coordinates(&img, roi, &config, &mut rng).unwrap() {
        RoiTimeSeries::Resampled(ts) => {
            assert_eq!((8, 5), ts.dim());
            assert_abs_diff_eq!(ts[[0, 3]], 100.0, epsilon = 1e-12);
        }
        other => panic!("expected resampled time series, got {:?}", other),
    }
}

#[test]
fn roi_signal_can_be_z_scored() {
    let img = demo_image();
    let roi = get_cluster_coordinates([3, 3, 3], 1, Connectivity::FacesEdges, None);
    let mut rng = StdRng::seed_from_u64(1);
    if let RoiTimeSeries::Mean(ts) = extract_ts_from_coordinates(&img, roi, &SamplingConfig::default(), &mut rng).unwrap() {
        let z = by_std(&ts).unwrap();
        assert_abs_diff_eq!(z.sum(), 0.0, epsilon = 1e-9);
    } else {
        panic!("expected a single mean time series");
    }
}

#[test]
fn voxel_wise_p_values_are_corrected_in_place_of_their_volume() {
    let pvals = Array4::from_shape_fn((2, 3, 2, 1), |(i, j, k, _)| 0.001 * (1 + i * 6 + j * 2 + k) as f64);
    let n = pvals.len() as f64;

    let bonf = multicomp_pval_correction(&pvals, CorrectionMethod::Bonferroni).unwrap();
    assert_eq!(pvals.shape(), bonf.shape());
    assert_abs_diff_eq!(bonf, pvals.mapv(|p| p * n), epsilon = 1e-12);

    // Evenly spaced p-values are all raised to the largest one by Benjamini-Hochberg.
    let bh = multicomp_pval_correction(&pvals, CorrectionMethod::BenjaminiHochberg).unwrap();
    assert!(bh.iter().all(|&v| (v - 0.012).abs() < 1e-12));

    let holm = multicomp_pval_correction(&pvals, "Bonferroni-Holm".parse().unwrap()).unwrap();
    assert_abs_diff_eq!(holm[[0, 0, 0, 0]], 0.012, epsilon = 1e-12);
    assert_abs_diff_eq!(holm[[1, 2, 1, 0]], 0.012, epsilon = 1e-12);
}

#[test]
fn spike_voxel_time_series_is_returned_unchanged() {
    let img = demo_image();
    let (_, ts) = calc_bold_properties(&img, &CoordinateSet::from([2, 2, 2])).unwrap();
    assert_eq!(array![100.0, 101.0, 102.0, 103.0, 130.0, 105.0, 106.0, 107.0], ts.row(0));
}
