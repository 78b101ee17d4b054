//! Core lookup-table module - pure, deterministic, and testable
//!
//! This crate contains every fixed-point table the raycaster reads at render
//! time, the approximation that replaces `SCREEN_HEIGHT / perpWallDist`, and
//! the offline search that tunes it. It has **no dependencies** on terminals,
//! files or the CLI, making it:
//!
//! - **Deterministic**: Same parameters always produce identical integers
//! - **Testable**: Every table and lookup is a pure function
//! - **Allocation-free at render time**: lookups only index immutable tables
//!
//! # Module Structure
//!
//! - [`line_height`]: Q7.8 line-height brackets and the interpolating approximator
//! - [`calibrate`]: Grid search for the first bracket against exact division
//! - [`analysis`]: Error sweep of the approximation over a distance range
//! - [`camera`]: Q1.7 camera-plane offsets per screen column
//! - [`delta_dist`]: Q8.8 inverse distance steps for the DDA setup
//! - [`sine`]: Quarter-wave sine table with quadrant folding
//! - [`emit`]: `constexpr` C++ array literals
//! - [`tables`]: All four tables generated together
//!
//! # Line Height Approximation
//!
//! - **Brackets**: `screen_height / d` in Q7.8 for `d = 1..=12`
//! - **Interpolation**: `base + ((next - base) * frac) >> 8` between brackets
//! - **Near walls**: distances below 1.0 saturate to `0x7FFF`
//! - **Far walls**: distances at or past the last bracket return it exactly
//! - **Calibration**: bracket 0 is 30840 instead of the closed-form 32768,
//!   cutting the worst-case error between distances 1.0 and 2.0 from 11 to
//!   7 pixels
//!
//! # Example
//!
//! ```
//! use raylut_core::{LineHeightApproximator, LineHeightTable};
//! use raylut_types::{Q7_8, CALIBRATED_NEAR_BRACKET};
//!
//! let table = LineHeightTable::build(128, 12, CALIBRATED_NEAR_BRACKET).unwrap();
//! let approx = LineHeightApproximator::new(table);
//!
//! // Exact bracket hit at distance 2.0
//! assert_eq!(approx.approximate(Q7_8::from_int(2)).raw(), 16384);
//! assert_eq!(approx.integer_height(Q7_8::from_int(2)), 64);
//!
//! // Closer than one unit: saturated
//! assert_eq!(approx.approximate(Q7_8::from_raw(100)).raw(), 0x7FFF);
//! ```

pub mod analysis;
pub mod calibrate;
pub mod camera;
pub mod delta_dist;
pub mod emit;
pub mod error;
pub mod line_height;
pub mod params;
pub mod sine;
pub mod tables;

pub use raylut_types as types;

// Re-export commonly used types for convenience
pub use analysis::{sweep, ErrorSample, ErrorSummary};
pub use calibrate::{
    find_optimal_override, find_optimal_override_with, CalibrationReport, CalibrationResult,
    Calibrator, ReferenceFn,
};
pub use camera::CameraRayTable;
pub use delta_dist::DeltaDistTable;
pub use emit::{CArray, CType};
pub use error::{LutError, Result};
pub use line_height::{
    exact_line_height, LineHeightApproximator, LineHeightTable, MAX_SCREEN_HEIGHT,
};
pub use params::{CalibrationParams, StepRange, TableParams};
pub use sine::SineTable;
pub use tables::TableSet;
