//! Line height module - `SCREEN_HEIGHT / perpWallDist` without division
//!
//! The table stores `screen_height / d` in Q7.8 for integer distances
//! `d = 1..=max_int_distance`. Fractional distances are linearly interpolated
//! between adjacent brackets. Bracket 0 (distance 1.0) is not the closed-form
//! value: it is chosen by the calibrator to bound the worst-case error over
//! `[1.0, 2.0)`, where the curve is steepest and a straight chord fits worst.
//!
//! # Boundary policy
//!
//! - Distances below 1.0 saturate to [`LINE_HEIGHT_SATURATED`].
//! - Distances whose integer part reaches `max_int_distance` return the last
//!   bracket exactly. There is no bracket past the end to interpolate toward,
//!   so no sentinel entry is stored and the fraction is ignored.

use arrayvec::ArrayVec;

use crate::error::{LutError, Result};
use crate::types::{QFormat, Q7_8, LINE_HEIGHT_SATURATED, MAX_BRACKETS, Q7_8_SHIFT};

const TABLE: &str = "lhTableApprox";

/// Tallest screen whose height is still an `i16` pixel count.
pub const MAX_SCREEN_HEIGHT: u16 = i16::MAX as u16;

/// Closed-form Q7.8 line height for integer distance `distance` (not narrowed).
pub fn closed_form_entry(screen_height: u16, distance: u16) -> i32 {
    QFormat::Q7_8.encode(screen_height as f64 / distance as f64)
}

/// Integer line height computed by direct fixed-point division.
///
/// This is the ground truth the approximation is measured against:
/// `min(((H << 16) - 1) / d >> 8, H)`, and `H` for non-positive distances.
/// Heights above [`MAX_SCREEN_HEIGHT`] saturate to it.
pub fn exact_line_height(screen_height: u16, distance: Q7_8) -> i16 {
    let cap = screen_height.min(MAX_SCREEN_HEIGHT) as i64;
    let raw = distance.raw() as i64;
    if raw <= 0 {
        return cap as i16;
    }
    let numerator = ((screen_height as i64) << 16) - 1;
    let height = (numerator / raw) >> Q7_8_SHIFT;
    height.min(cap) as i16
}

/// Q7.8 line heights at integer distances `1..=len`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineHeightTable {
    entries: ArrayVec<i16, MAX_BRACKETS>,
    screen_height: u16,
}

impl LineHeightTable {
    /// Pre-calibration table: every bracket is the closed-form value.
    ///
    /// Bracket 0 equals `screen_height << 8`, which overflows i16 for the
    /// reference height of 128. It is pinned to `0x7FFF` so it cannot wrap
    /// negative; any other overflow is an error.
    pub fn closed_form(screen_height: u16, max_int_distance: u8) -> Result<Self> {
        if screen_height == 0 || screen_height > MAX_SCREEN_HEIGHT {
            return Err(LutError::ScreenHeight(screen_height));
        }
        let count = max_int_distance as usize;
        if count == 0 || count > MAX_BRACKETS {
            return Err(LutError::BracketCount { got: count });
        }

        let mut entries = ArrayVec::new();
        for index in 0..count {
            let mut raw = closed_form_entry(screen_height, index as u16 + 1);
            if index == 0 && raw > QFormat::Q7_8.max_raw() {
                raw = LINE_HEIGHT_SATURATED as i32;
            }
            let value = i16::try_from(raw).map_err(|_| LutError::Overflow {
                table: TABLE,
                index,
                raw,
                format: QFormat::Q7_8,
            })?;
            entries.push(value);
        }

        Ok(Self {
            entries,
            screen_height,
        })
    }

    /// Final table with the calibrated value installed at bracket 0.
    pub fn build(screen_height: u16, max_int_distance: u8, calibrated_override: i16) -> Result<Self> {
        Self::closed_form(screen_height, max_int_distance)?.with_override(calibrated_override)
    }

    /// Copy of this table with bracket 0 replaced.
    ///
    /// The override must stay at or above bracket 1 so heights never increase
    /// with distance.
    pub fn with_override(&self, value: i16) -> Result<Self> {
        if let Some(&next) = self.entries.get(1) {
            if value < next {
                return Err(LutError::NonMonotonicOverride { value, next });
            }
        } else if value < 0 {
            return Err(LutError::NonMonotonicOverride { value, next: 0 });
        }
        let mut table = self.clone();
        table.entries[0] = value;
        Ok(table)
    }

    pub fn entries(&self) -> &[i16] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_int_distance(&self) -> u8 {
        self.entries.len() as u8
    }

    pub fn screen_height(&self) -> u16 {
        self.screen_height
    }

    /// Bracket value for integer distance `distance` (1-based).
    pub fn bracket(&self, distance: u8) -> Option<i16> {
        let index = (distance as usize).checked_sub(1)?;
        self.entries.get(index).copied()
    }
}

/// Render-time line-height lookup over an immutable table.
///
/// One call per screen column. Pure and allocation-free.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineHeightApproximator {
    table: LineHeightTable,
}

impl LineHeightApproximator {
    pub fn new(table: LineHeightTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &LineHeightTable {
        &self.table
    }

    pub fn into_table(self) -> LineHeightTable {
        self.table
    }

    /// Approximate Q7.8 line height for a Q7.8 perpendicular wall distance.
    #[inline]
    pub fn approximate(&self, distance: Q7_8) -> Q7_8 {
        let entries = self.table.entries();
        let last = entries.len();

        let int_part = distance.int_part() as usize;
        let frac_part = distance.frac_part() as i32;

        if int_part == 0 {
            return Q7_8::from_raw(LINE_HEIGHT_SATURATED);
        }
        if int_part >= last {
            return Q7_8::from_raw(entries[last - 1]);
        }

        let base = entries[int_part - 1] as i32;
        if frac_part == 0 {
            return Q7_8::from_raw(base as i16);
        }

        let next = entries[int_part] as i32;
        let interp = ((next - base) * frac_part) >> Q7_8_SHIFT;
        Q7_8::from_raw((base + interp) as i16)
    }

    /// Whole-pixel line height (`approximate(d) >> 8`).
    #[inline]
    pub fn integer_height(&self, distance: Q7_8) -> i16 {
        self.approximate(distance).to_int()
    }
}
