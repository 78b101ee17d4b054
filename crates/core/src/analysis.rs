//! Error analysis of the line-height approximation over a distance sweep.

use serde::{Deserialize, Serialize};

use crate::error::{LutError, Result};
use crate::line_height::{exact_line_height, LineHeightApproximator};
use crate::params::StepRange;
use crate::types::{QFormat, Q7_8};

/// Approximate and exact heights at one distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorSample {
    /// Raw Q7.8 distance.
    pub distance: i16,
    pub approx: i16,
    pub exact: i16,
}

impl ErrorSample {
    pub fn distance(&self) -> Q7_8 {
        Q7_8::from_raw(self.distance)
    }

    pub fn abs_error(&self) -> u16 {
        (self.approx as i32).abs_diff(self.exact as i32) as u16
    }
}

/// Aggregate of a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ErrorSummary {
    pub samples: usize,
    pub max_abs_error: u16,
    pub avg_abs_error: f64,
    /// Raw Q7.8 distance of the first maximum.
    pub worst_distance: i16,
}

impl ErrorSummary {
    pub fn from_samples(samples: &[ErrorSample]) -> Option<Self> {
        let first = samples.first()?;
        let mut worst = first;
        let mut total = 0u64;
        for sample in samples {
            if sample.abs_error() > worst.abs_error() {
                worst = sample;
            }
            total += sample.abs_error() as u64;
        }
        Some(Self {
            samples: samples.len(),
            max_abs_error: worst.abs_error(),
            avg_abs_error: total as f64 / samples.len() as f64,
            worst_distance: worst.distance,
        })
    }
}

/// Evaluate the approximator against the exact reference at every distance in `domain`.
pub fn sweep(
    approx: &LineHeightApproximator,
    screen_height: u16,
    domain: StepRange,
) -> Result<Vec<ErrorSample>> {
    domain.validate()?;
    if domain.is_empty() {
        return Err(LutError::EmptyDomain);
    }

    // Only i16 distances are valid, so a wider domain fails before filling this.
    let mut samples = Vec::with_capacity(domain.len().min(1 << 16));
    for raw in domain.iter() {
        let raw = i16::try_from(raw).map_err(|_| LutError::Overflow {
            table: "analysis domain",
            index: samples.len(),
            raw,
            format: QFormat::Q7_8,
        })?;
        let distance = Q7_8::from_raw(raw);
        samples.push(ErrorSample {
            distance: raw,
            approx: approx.integer_height(distance),
            exact: exact_line_height(screen_height, distance),
        });
    }
    Ok(samples)
}
