//! Generation and calibration parameters.
//!
//! All structs here deserialize with per-field defaults, so a partial config
//! file only needs to name what it changes.

use serde::{Deserialize, Serialize};

use crate::error::{LutError, Result};
use crate::types::{
    CALIBRATED_NEAR_BRACKET, DELTA_DIST_STEPS, MAX_PERPWALLDIST_INT, SCREEN_HEIGHT, SCREEN_WIDTH,
    SINE_MAX_DEGREES,
};

/// Half-open arithmetic progression `start, start + step, ..` below `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRange {
    pub start: i32,
    pub end: i32,
    pub step: u32,
}

impl StepRange {
    pub const fn new(start: i32, end: i32, step: u32) -> Self {
        Self { start, end, step }
    }

    /// Candidate values for the first line-height bracket.
    pub const REFERENCE_CANDIDATES: StepRange = StepRange::new(28000, 32768, 10);

    /// Q7.8 distances covering `[1.0, 2.0]`.
    pub const REFERENCE_DOMAIN: StepRange = StepRange::new(256, 513, 1);

    /// Q7.8 distances swept by the error analysis.
    pub const ANALYSIS_DOMAIN: StepRange =
        StepRange::new(1, MAX_PERPWALLDIST_INT as i32 * 256, 5);

    pub fn validate(&self) -> Result<()> {
        if self.step == 0 {
            return Err(LutError::ZeroStep);
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn len(&self) -> usize {
        if self.is_empty() || self.step == 0 {
            return 0;
        }
        let span = (self.end as i64 - self.start as i64) as u64;
        span.div_ceil(self.step as u64) as usize
    }

    pub fn iter(&self) -> impl Iterator<Item = i32> {
        // A zero step is rejected by `validate`; iterate it as a single value.
        (self.start..self.end).step_by(self.step.max(1) as usize)
    }
}

/// Inputs of the four constant tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableParams {
    pub screen_width: u16,
    pub screen_height: u16,
    pub max_int_distance: u8,
    pub delta_dist_steps: u16,
    pub sine_max_degrees: u16,
    /// Value baked into line-height bracket 0.
    pub line_height_override: i16,
}

impl Default for TableParams {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            max_int_distance: MAX_PERPWALLDIST_INT,
            delta_dist_steps: DELTA_DIST_STEPS,
            sine_max_degrees: SINE_MAX_DEGREES,
            line_height_override: CALIBRATED_NEAR_BRACKET,
        }
    }
}

/// Inputs of the first-bracket grid search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationParams {
    pub screen_height: u16,
    pub max_int_distance: u8,
    pub candidates: StepRange,
    pub domain: StepRange,
}

impl Default for CalibrationParams {
    fn default() -> Self {
        Self {
            screen_height: SCREEN_HEIGHT,
            max_int_distance: MAX_PERPWALLDIST_INT,
            candidates: StepRange::REFERENCE_CANDIDATES,
            domain: StepRange::REFERENCE_DOMAIN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_ranges() {
        assert_eq!(StepRange::REFERENCE_CANDIDATES.len(), 477);
        assert_eq!(StepRange::REFERENCE_CANDIDATES.iter().last(), Some(32760));
        assert_eq!(StepRange::REFERENCE_DOMAIN.len(), 257);
        assert_eq!(StepRange::ANALYSIS_DOMAIN.len(), 615);
    }

    #[test]
    fn test_len_matches_iter() {
        let r = StepRange::new(3, 20, 4);
        assert_eq!(r.len(), r.iter().count());
        assert_eq!(StepRange::new(5, 5, 1).len(), 0);
        assert!(StepRange::new(9, 2, 1).is_empty());
    }

    #[test]
    fn test_len_of_full_i32_range() {
        let r = StepRange::new(i32::MIN, i32::MAX, 1);
        assert_eq!(r.len() as u64, u32::MAX as u64);
        assert_eq!(StepRange::new(i32::MIN, i32::MAX, u32::MAX).len(), 1);
        assert_eq!(StepRange::new(-10, 10, 7).len(), 3);
    }

    #[test]
    fn test_zero_step_rejected() {
        assert_eq!(StepRange::new(0, 10, 0).validate(), Err(LutError::ZeroStep));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let p: TableParams = serde_json::from_str(r#"{ "screen_width": 320 }"#).unwrap();
        assert_eq!(p.screen_width, 320);
        assert_eq!(p.screen_height, SCREEN_HEIGHT);
        assert_eq!(p.line_height_override, CALIBRATED_NEAR_BRACKET);
    }
}
