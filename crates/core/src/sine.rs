//! Quarter-wave sine table, `round(sin(deg) * 255)` for whole degrees.
//!
//! Other quadrants are folded onto the stored quadrant with a sign at lookup
//! time. Values are scaled by 255, which makes them usable directly as Q7.8
//! (off by under 0.4%).

use crate::error::{LutError, Result};
use crate::types::{Q7_8, SINE_AMPLITUDE};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SineTable {
    entries: Vec<u8>,
}

impl SineTable {
    /// Entries for degrees `0..=max_degrees`; at most one quadrant.
    pub fn build(max_degrees: u16) -> Result<Self> {
        if max_degrees > 90 {
            return Err(LutError::SineDegrees(max_degrees));
        }
        let entries = (0..=max_degrees)
            .map(|deg| {
                let v = (deg as f64).to_radians().sin() * SINE_AMPLITUDE;
                v.round() as u8
            })
            .collect();
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[u8] {
        &self.entries
    }

    pub fn covers_quarter_wave(&self) -> bool {
        self.entries.len() == 91
    }

    /// Signed sine of a whole-degree angle, as Q7.8.
    ///
    /// Returns `None` when the folded angle is past the end of a partial table.
    pub fn sin_deg(&self, degrees: i32) -> Option<Q7_8> {
        let angle = degrees.rem_euclid(360);
        let (index, negative) = match angle {
            0..=90 => (angle, false),
            91..=180 => (180 - angle, false),
            181..=270 => (angle - 180, true),
            _ => (360 - angle, true),
        };
        let value = *self.entries.get(index as usize)? as i16;
        Some(Q7_8::from_raw(if negative { -value } else { value }))
    }

    /// `cos(d) = sin(90 - d)`.
    pub fn cos_deg(&self, degrees: i32) -> Option<Q7_8> {
        self.sin_deg(90 - degrees)
    }
}
