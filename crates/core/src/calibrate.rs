//! Calibrator - offline grid search for line-height bracket 0
//!
//! Every candidate is installed into a fresh copy of the closed-form table and
//! scored by the largest absolute pixel error against [`exact_line_height`]
//! over the test domain. The error surface has steps wherever the fixed-point
//! truncation flips, so the search evaluates every candidate instead of
//! following a gradient. The first candidate reaching the minimum wins.

use serde::{Deserialize, Serialize};

use crate::error::{LutError, Result};
use crate::line_height::{exact_line_height, LineHeightApproximator, LineHeightTable};
use crate::params::{CalibrationParams, StepRange};
use crate::types::{QFormat, Q7_8};

/// Error statistics for one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationResult {
    pub candidate_value: i16,
    pub max_abs_error: u16,
    pub avg_abs_error: f64,
}

/// Parameters and outcome of a calibration run, as written by `raylut calibrate --json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationReport {
    pub params: CalibrationParams,
    pub candidates_tested: usize,
    pub samples_per_candidate: usize,
    pub best: CalibrationResult,
}

/// Ground-truth height for `(screen_height, distance)`.
pub type ReferenceFn = fn(u16, Q7_8) -> i16;

#[derive(Debug, Clone)]
pub struct Calibrator {
    params: CalibrationParams,
    base: LineHeightTable,
    domain: Vec<Q7_8>,
    reference: ReferenceFn,
}

impl Calibrator {
    pub fn new(params: CalibrationParams) -> Result<Self> {
        params.candidates.validate()?;
        params.domain.validate()?;
        if params.candidates.is_empty() {
            return Err(LutError::EmptyCandidates);
        }
        if params.domain.is_empty() {
            return Err(LutError::EmptyDomain);
        }

        let base = LineHeightTable::closed_form(params.screen_height, params.max_int_distance)?;
        let domain = params
            .domain
            .iter()
            .map(|raw| narrow("calibration domain", raw, params.domain).map(Q7_8::from_raw))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            params,
            base,
            domain,
            reference: exact_line_height,
        })
    }

    /// Score candidates against `reference` instead of [`exact_line_height`].
    pub fn with_reference(mut self, reference: ReferenceFn) -> Self {
        self.reference = reference;
        self
    }

    pub fn params(&self) -> &CalibrationParams {
        &self.params
    }

    pub fn domain(&self) -> &[Q7_8] {
        &self.domain
    }

    /// Score one candidate value for bracket 0.
    pub fn evaluate(&self, candidate: i16) -> Result<CalibrationResult> {
        let approx = LineHeightApproximator::new(self.base.with_override(candidate)?);
        let screen_height = self.params.screen_height;

        let mut max_abs_error = 0u16;
        let mut total = 0u64;
        for &distance in &self.domain {
            let approx_h = approx.integer_height(distance) as i32;
            let exact_h = (self.reference)(screen_height, distance) as i32;
            let err = approx_h.abs_diff(exact_h) as u16;
            max_abs_error = max_abs_error.max(err);
            total += err as u64;
        }

        Ok(CalibrationResult {
            candidate_value: candidate,
            max_abs_error,
            avg_abs_error: total as f64 / self.domain.len() as f64,
        })
    }

    /// Results for every candidate in ascending candidate order.
    pub fn trials(&self) -> Result<Vec<CalibrationResult>> {
        self.candidates()
            .map(|candidate| self.evaluate(candidate?))
            .collect()
    }

    /// Candidate with the smallest maximum error; earliest wins ties.
    pub fn run(&self) -> Result<CalibrationResult> {
        let mut best: Option<CalibrationResult> = None;
        for candidate in self.candidates() {
            let result = self.evaluate(candidate?)?;
            if best.map_or(true, |b| result.max_abs_error < b.max_abs_error) {
                tracing::debug!(
                    candidate = result.candidate_value,
                    max_error = result.max_abs_error,
                    avg_error = result.avg_abs_error,
                    "calibration improved"
                );
                best = Some(result);
            }
        }

        let best = best.ok_or(LutError::EmptyCandidates)?;
        tracing::info!(
            candidate = best.candidate_value,
            max_error = best.max_abs_error,
            avg_error = best.avg_abs_error,
            "calibration finished"
        );
        Ok(best)
    }

    /// Run the search and wrap the optimum with its inputs.
    pub fn report(&self) -> Result<CalibrationReport> {
        self.wrap(self.run()?)
    }

    /// Report built from results of [`Calibrator::trials`], without searching again.
    pub fn report_from(&self, trials: &[CalibrationResult]) -> Result<CalibrationReport> {
        let best = trials
            .iter()
            .copied()
            .reduce(|best, t| if t.max_abs_error < best.max_abs_error { t } else { best })
            .ok_or(LutError::EmptyCandidates)?;
        self.wrap(best)
    }

    fn wrap(&self, best: CalibrationResult) -> Result<CalibrationReport> {
        Ok(CalibrationReport {
            params: self.params,
            candidates_tested: self.params.candidates.len(),
            samples_per_candidate: self.domain.len(),
            best,
        })
    }

    /// Final table with the optimal candidate baked in.
    pub fn calibrated_table(&self) -> Result<LineHeightTable> {
        let best = self.run()?;
        self.base.with_override(best.candidate_value)
    }

    fn candidates(&self) -> impl Iterator<Item = Result<i16>> + '_ {
        let range = self.params.candidates;
        range
            .iter()
            .map(move |raw| narrow("calibration candidates", raw, range))
    }
}

/// Search with the reference parameters (height 128, 12 brackets).
pub fn find_optimal_override() -> Result<CalibrationResult> {
    find_optimal_override_with(CalibrationParams::default(), exact_line_height)
}

/// Grid search over `params.candidates` and `params.domain` against `reference`.
pub fn find_optimal_override_with(
    params: CalibrationParams,
    reference: ReferenceFn,
) -> Result<CalibrationResult> {
    Calibrator::new(params)?.with_reference(reference).run()
}

fn narrow(table: &'static str, raw: i32, range: StepRange) -> Result<i16> {
    i16::try_from(raw).map_err(|_| LutError::Overflow {
        table,
        index: ((raw - range.start) / range.step.max(1) as i32) as usize,
        raw,
        format: QFormat::Q7_8,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CALIBRATED_NEAR_BRACKET, MAX_PERPWALLDIST_INT, SCREEN_HEIGHT};

    fn small_params(candidates: StepRange) -> CalibrationParams {
        CalibrationParams {
            candidates,
            ..CalibrationParams::default()
        }
    }

    #[test]
    fn test_reference_search_finds_calibrated_value() {
        let best = find_optimal_override().unwrap();
        assert_eq!(best.candidate_value, CALIBRATED_NEAR_BRACKET);
        assert_eq!(best.max_abs_error, 7);
    }

    #[test]
    fn test_ties_keep_first_candidate() {
        // 30840, 30850 and 30860 all reach a max error of 7.
        let calibrator = Calibrator::new(small_params(StepRange::new(30840, 30870, 10))).unwrap();
        let trials = calibrator.trials().unwrap();
        assert!(trials.iter().all(|t| t.max_abs_error == 7));
        assert_eq!(calibrator.run().unwrap().candidate_value, 30840);
    }

    #[test]
    fn test_empty_inputs_are_rejected() {
        assert_eq!(
            Calibrator::new(small_params(StepRange::new(100, 100, 10))).unwrap_err(),
            LutError::EmptyCandidates
        );
        let params = CalibrationParams {
            domain: StepRange::new(300, 256, 1),
            ..CalibrationParams::default()
        };
        assert_eq!(Calibrator::new(params).unwrap_err(), LutError::EmptyDomain);
    }

    #[test]
    fn test_candidate_below_next_bracket_is_an_error() {
        let calibrator = Calibrator::new(small_params(StepRange::new(16000, 16400, 100))).unwrap();
        assert!(matches!(
            calibrator.run(),
            Err(LutError::NonMonotonicOverride { value: 16000, .. })
        ));
    }

    #[test]
    fn test_candidate_outside_i16_is_an_error() {
        let calibrator = Calibrator::new(small_params(StepRange::new(32760, 32780, 10))).unwrap();
        assert!(matches!(
            calibrator.trials(),
            Err(LutError::Overflow { raw: 32770, .. })
        ));
    }

    #[test]
    fn test_custom_reference_changes_optimum() {
        // Constant reference: the worst error is always at distance 2.0, so
        // every candidate ties and the first one wins.
        fn flat(_: u16, _: Q7_8) -> i16 {
            127
        }
        let params = small_params(StepRange::new(30000, 32768, 100));
        let best = find_optimal_override_with(params, flat).unwrap();
        assert_eq!((best.candidate_value, best.max_abs_error), (30000, 63));
        assert_eq!(
            Calibrator::new(params).unwrap().with_reference(flat).run().unwrap(),
            best
        );
    }

    #[test]
    fn test_report_from_trials_matches_search() {
        let calibrator = Calibrator::new(small_params(StepRange::new(30800, 30900, 10))).unwrap();
        let trials = calibrator.trials().unwrap();
        let report = calibrator.report_from(&trials).unwrap();
        assert_eq!(report, calibrator.report().unwrap());
        assert_eq!(report.best.candidate_value, 30840);
        assert_eq!(report.candidates_tested, trials.len());
        assert_eq!(
            calibrator.report_from(&[]).unwrap_err(),
            LutError::EmptyCandidates
        );
    }

    #[test]
    fn test_calibrated_table_bakes_optimum() {
        let calibrator = Calibrator::new(CalibrationParams::default()).unwrap();
        let table = calibrator.calibrated_table().unwrap();
        assert_eq!(table.entries()[0], CALIBRATED_NEAR_BRACKET);
        assert_eq!(table.len(), MAX_PERPWALLDIST_INT as usize);
        assert_eq!(table.screen_height(), SCREEN_HEIGHT);
    }
}
