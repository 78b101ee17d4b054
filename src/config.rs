use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::{CalibrationParams, StepRange, TableParams};

/// Everything the CLI needs, loadable from a JSON file.
///
/// Every section and field is optional; omitted values fall back to the
/// reference geometry (160x128 screen, 12 line-height brackets).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LutConfig {
    pub tables: TableParams,
    pub calibration: CalibrationParams,
    /// Q7.8 distances swept by `raylut analyze`.
    pub analysis: StepRange,
}

impl Default for LutConfig {
    fn default() -> Self {
        Self {
            tables: TableParams::default(),
            calibration: CalibrationParams::default(),
            analysis: StepRange::ANALYSIS_DOMAIN,
        }
    }
}

impl LutConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("config: cannot read {}", path.display()))?;
        let config =
            Self::from_json(&text).with_context(|| format!("config: {}", path.display()))?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text).context("invalid JSON")?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject combinations the generators would only catch later, or not at all.
    pub fn validate(&self) -> Result<()> {
        self.calibration
            .candidates
            .validate()
            .context("calibration.candidates")?;
        self.calibration
            .domain
            .validate()
            .context("calibration.domain")?;
        self.analysis.validate().context("analysis")?;

        // The calibrated override is only meaningful for the table it was tuned on.
        if self.calibration.screen_height != self.tables.screen_height {
            return Err(anyhow!(
                "calibration.screen_height ({}) differs from tables.screen_height ({})",
                self.calibration.screen_height,
                self.tables.screen_height
            ));
        }
        if self.calibration.max_int_distance != self.tables.max_int_distance {
            return Err(anyhow!(
                "calibration.max_int_distance ({}) differs from tables.max_int_distance ({})",
                self.calibration.max_int_distance,
                self.tables.max_int_distance
            ));
        }
        Ok(())
    }
}
