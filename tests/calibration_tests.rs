//! Calibration search and error analysis over the reference geometry.

use raylut::core::{
    find_optimal_override, sweep, CalibrationParams, Calibrator, ErrorSummary,
    LineHeightApproximator, LineHeightTable, LutError, StepRange,
};
use raylut::types::{CALIBRATED_NEAR_BRACKET, MAX_PERPWALLDIST_INT, SCREEN_HEIGHT};

fn summary_for(table: LineHeightTable, domain: StepRange) -> ErrorSummary {
    let approx = LineHeightApproximator::new(table);
    let samples = sweep(&approx, SCREEN_HEIGHT, domain).unwrap();
    ErrorSummary::from_samples(&samples).unwrap()
}

#[test]
fn test_reference_optimum() {
    let best = find_optimal_override().unwrap();
    assert_eq!(best.candidate_value, 30840);
    assert_eq!(best.max_abs_error, 7);
    assert!((best.avg_abs_error - 4.416342412451362).abs() < 1e-9);
}

#[test]
fn test_optimum_is_no_worse_than_any_candidate() {
    let calibrator = Calibrator::new(CalibrationParams::default()).unwrap();
    let trials = calibrator.trials().unwrap();
    let best = calibrator.run().unwrap();

    assert_eq!(trials.len(), 477);
    assert!(trials.iter().all(|t| t.max_abs_error >= best.max_abs_error));
    assert_eq!(
        trials.iter().filter(|t| t.max_abs_error == best.max_abs_error).count(),
        11
    );
    // Earliest minimum wins.
    let first = trials
        .iter()
        .find(|t| t.max_abs_error == best.max_abs_error)
        .unwrap();
    assert_eq!(first.candidate_value, best.candidate_value);
}

#[test]
fn test_calibration_is_deterministic() {
    let a = find_optimal_override().unwrap();
    let b = find_optimal_override().unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_report_describes_search() {
    let report = Calibrator::new(CalibrationParams::default())
        .unwrap()
        .report()
        .unwrap();
    assert_eq!(report.candidates_tested, 477);
    assert_eq!(report.samples_per_candidate, 257);
    assert_eq!(report.best.candidate_value, CALIBRATED_NEAR_BRACKET);
    assert_eq!(report.params, CalibrationParams::default());
}

#[test]
fn test_calibration_beats_closed_form_on_near_range() {
    let closed = LineHeightTable::closed_form(SCREEN_HEIGHT, MAX_PERPWALLDIST_INT).unwrap();
    let calibrated = closed.with_override(CALIBRATED_NEAR_BRACKET).unwrap();

    let before = summary_for(closed, StepRange::REFERENCE_DOMAIN);
    let after = summary_for(calibrated, StepRange::REFERENCE_DOMAIN);

    assert_eq!(before.max_abs_error, 11);
    assert_eq!(after.max_abs_error, 7);
    assert!(after.avg_abs_error < before.avg_abs_error);
}

#[test]
fn test_analysis_sweep_over_full_range() {
    let closed = LineHeightTable::closed_form(SCREEN_HEIGHT, MAX_PERPWALLDIST_INT).unwrap();
    let calibrated = closed.with_override(CALIBRATED_NEAR_BRACKET).unwrap();

    let before = summary_for(closed, StepRange::ANALYSIS_DOMAIN);
    assert_eq!(before.samples, 615);
    assert_eq!(before.max_abs_error, 11);
    assert_eq!(before.worst_distance, 331);

    let after = summary_for(calibrated, StepRange::ANALYSIS_DOMAIN);
    assert_eq!(after.max_abs_error, 7);
    assert_eq!(after.worst_distance, 256);
    assert!((after.avg_abs_error - 0.6796747967479675).abs() < 1e-9);
}

#[test]
fn test_one_and_a_half_is_within_calibrated_bound() {
    let table = Calibrator::new(CalibrationParams::default())
        .unwrap()
        .calibrated_table()
        .unwrap();
    let samples = sweep(
        &LineHeightApproximator::new(table),
        SCREEN_HEIGHT,
        StepRange::new(384, 385, 1),
    )
    .unwrap();
    assert_eq!(samples.len(), 1);
    assert_eq!((samples[0].approx, samples[0].exact), (92, 85));
    assert!(samples[0].abs_error() <= 7);
}

#[test]
fn test_smaller_screen_calibrates() {
    let params = CalibrationParams {
        screen_height: 64,
        max_int_distance: 8,
        candidates: StepRange::new(12000, 16384, 16),
        domain: StepRange::new(256, 513, 1),
    };
    let calibrator = Calibrator::new(params).unwrap();
    let best = calibrator.run().unwrap();
    let trials = calibrator.trials().unwrap();
    assert!(trials.iter().all(|t| t.max_abs_error >= best.max_abs_error));
    assert_eq!(calibrator.calibrated_table().unwrap().len(), 8);
}

#[test]
fn test_oversized_screen_height_is_rejected_before_search() {
    let params = CalibrationParams {
        screen_height: 40000,
        max_int_distance: 1,
        ..CalibrationParams::default()
    };
    assert_eq!(
        Calibrator::new(params).unwrap_err(),
        LutError::ScreenHeight(40000)
    );
}

#[test]
fn test_sweep_rejects_domain_outside_q7_8() {
    let table = LineHeightTable::closed_form(SCREEN_HEIGHT, MAX_PERPWALLDIST_INT).unwrap();
    let approx = LineHeightApproximator::new(table);
    let err = sweep(&approx, SCREEN_HEIGHT, StepRange::new(i32::MIN, i32::MAX, 1)).unwrap_err();
    assert!(matches!(err, LutError::Overflow { raw: i32::MIN, .. }));
}
