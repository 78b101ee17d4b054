//! Inverse distance steps (`1 / rayDir`) in Q8.8 for the DDA setup.
//!
//! Entry `i` holds `1 / ((i + 1) / steps)`. Entry 0 stands in for a ray
//! direction of zero and is pinned to `0x7FFF` rather than computed.

use crate::error::{LutError, Result};
use crate::types::{QFormat, Q7_8};

const TABLE: &str = "deltaDistTable";

/// Value stored for the degenerate (near zero) ray direction.
pub const DELTA_DIST_PINNED: i16 = 0x7FFF;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeltaDistTable {
    entries: Vec<i16>,
}

impl DeltaDistTable {
    pub fn build(steps: u16) -> Result<Self> {
        if steps == 0 {
            return Err(LutError::EmptySteps);
        }

        let mut entries = Vec::with_capacity(steps as usize);
        entries.push(DELTA_DIST_PINNED);
        for i in 2..=steps {
            let x = i as f64 / steps as f64;
            let raw = QFormat::Q8_8.encode(1.0 / x);
            let value = i16::try_from(raw).map_err(|_| LutError::Overflow {
                table: TABLE,
                index: entries.len(),
                raw,
                format: QFormat::Q8_8,
            })?;
            entries.push(value);
        }

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[i16] {
        &self.entries
    }

    pub fn steps(&self) -> usize {
        self.entries.len()
    }

    /// Inverse step length for a Q7.8 ray direction component.
    ///
    /// A zero component maps to entry 0. Otherwise the index is
    /// `|dir * steps + 128| >> 8`, clamped to the last entry.
    pub fn delta_dist(&self, ray_dir: Q7_8) -> i16 {
        if ray_dir == Q7_8::ZERO {
            return self.entries[0];
        }
        let scaled = ray_dir.raw() as i32 * self.entries.len() as i32 + 128;
        let index = (scaled.unsigned_abs() >> 8) as usize;
        self.entries[index.min(self.entries.len() - 1)]
    }
}
