//! Error type shared by the table generators and the calibrator.

use raylut_types::{QFormat, MAX_BRACKETS};
use thiserror::Error;

/// Errors raised while building or calibrating tables.
///
/// Every table is computed over a closed domain, so these only ever signal
/// invalid parameters; render-time lookups never fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LutError {
    #[error("{table}: entry {index} ({raw}) does not fit {format}")]
    Overflow {
        table: &'static str,
        index: usize,
        raw: i32,
        format: QFormat,
    },

    #[error("line height table needs 1..={max} brackets, got {got}", max = MAX_BRACKETS)]
    BracketCount { got: usize },

    #[error("screen width must be a non-zero even number, got {0}")]
    ScreenWidth(u16),

    #[error("screen height {0} is outside 1..=32767")]
    ScreenHeight(u16),

    #[error("delta distance table needs at least one step")]
    EmptySteps,

    #[error("sine table covers at most 90 degrees, got {0}")]
    SineDegrees(u16),

    #[error("calibrated override {value} is below the next bracket {next}")]
    NonMonotonicOverride { value: i16, next: i16 },

    #[error("calibration candidate range is empty")]
    EmptyCandidates,

    #[error("calibration test domain is empty")]
    EmptyDomain,

    #[error("range step must be non-zero")]
    ZeroStep,
}

pub type Result<T> = std::result::Result<T, LutError>;
