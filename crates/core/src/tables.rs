//! The complete set of renderer tables, generated once and then read-only.

use crate::camera::CameraRayTable;
use crate::delta_dist::DeltaDistTable;
use crate::emit::{CArray, CType};
use crate::error::Result;
use crate::line_height::{LineHeightApproximator, LineHeightTable};
use crate::params::TableParams;
use crate::sine::SineTable;

pub const CAMERA_TABLE_NAME: &str = "cameraXtable";
pub const DELTA_DIST_TABLE_NAME: &str = "deltaDistTable";
pub const SINE_TABLE_NAME: &str = "sinTable";
pub const LINE_HEIGHT_TABLE_NAME: &str = "lhTableApprox";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSet {
    pub camera: CameraRayTable,
    pub delta_dist: DeltaDistTable,
    pub sine: SineTable,
    pub line_height: LineHeightTable,
}

impl TableSet {
    pub fn generate(params: &TableParams) -> Result<Self> {
        let set = Self {
            camera: CameraRayTable::build(params.screen_width)?,
            delta_dist: DeltaDistTable::build(params.delta_dist_steps)?,
            sine: SineTable::build(params.sine_max_degrees)?,
            line_height: LineHeightTable::build(
                params.screen_height,
                params.max_int_distance,
                params.line_height_override,
            )?,
        };
        tracing::debug!(
            camera = set.camera.entries().len(),
            delta_dist = set.delta_dist.entries().len(),
            sine = set.sine.entries().len(),
            line_height = set.line_height.len(),
            "tables generated"
        );
        Ok(set)
    }

    /// Approximator over a copy of the line-height table.
    pub fn approximator(&self) -> LineHeightApproximator {
        LineHeightApproximator::new(self.line_height.clone())
    }

    /// One literal per table: camera, delta distance, sine, line height.
    pub fn emit(&self) -> [String; 4] {
        [
            CArray::new(CType::Int8, CAMERA_TABLE_NAME, self.camera.entries()).to_string(),
            CArray::new(CType::Int16, DELTA_DIST_TABLE_NAME, self.delta_dist.entries()).to_string(),
            CArray::new(CType::UInt16, SINE_TABLE_NAME, self.sine.entries()).to_string(),
            CArray::new(CType::Int16, LINE_HEIGHT_TABLE_NAME, self.line_height.entries())
                .to_string(),
        ]
    }
}
