//! Charts for the two offline reports: error analysis and calibration.

use crate::chart::{Chart, Marker, Panel, Series};
use crate::core::{CalibrationResult, ErrorSample, ErrorSummary};
use crate::fb::Rgb;

const APPROX: Rgb = Rgb::new(90, 170, 250);
const EXACT: Rgb = Rgb::new(250, 170, 60);
const ERROR: Rgb = Rgb::new(120, 220, 120);

/// Heights and absolute error against distance.
pub fn analysis_chart(title: &str, samples: &[ErrorSample]) -> Chart {
    let distances = || samples.iter().map(|s| s.distance().to_f64());

    let heights = Panel {
        title: "Line height vs perpWallDist".to_string(),
        x_label: "perpWallDist".to_string(),
        y_label: "pixels".to_string(),
        series: vec![
            Series::new("exact", '·', EXACT)
                .with_points(distances().zip(samples.iter().map(|s| s.exact as f64))),
            Series::new("approx", '•', APPROX)
                .with_points(distances().zip(samples.iter().map(|s| s.approx as f64))),
        ],
        marker: None,
    };

    let errors = Panel {
        title: "Absolute error vs perpWallDist".to_string(),
        x_label: "perpWallDist".to_string(),
        y_label: "pixels".to_string(),
        series: vec![Series::new("error", '•', ERROR)
            .with_points(distances().zip(samples.iter().map(|s| s.abs_error() as f64)))],
        marker: ErrorSummary::from_samples(samples).map(|summary| Marker {
            x: summary.worst_distance as f64 / 256.0,
            y: summary.max_abs_error as f64,
            label: format!(
                "max {} px, avg {:.2} px",
                summary.max_abs_error, summary.avg_abs_error
            ),
        }),
    };

    Chart {
        title: title.to_string(),
        panels: vec![heights, errors],
        footer: None,
    }
}

/// Max and average error for each candidate, optimum marked.
pub fn calibration_chart(trials: &[CalibrationResult], best: &CalibrationResult) -> Chart {
    let candidates = || trials.iter().map(|t| t.candidate_value as f64);

    let max_panel = Panel {
        title: "Max error vs bracket 0 value".to_string(),
        x_label: "bracket 0 (Q7.8)".to_string(),
        y_label: "pixels".to_string(),
        series: vec![Series::new("max error", '•', ERROR)
            .with_points(candidates().zip(trials.iter().map(|t| t.max_abs_error as f64)))],
        marker: Some(Marker {
            x: best.candidate_value as f64,
            y: best.max_abs_error as f64,
            label: format!("optimal {}", best.candidate_value),
        }),
    };

    let avg_panel = Panel {
        title: "Average error vs bracket 0 value".to_string(),
        x_label: "bracket 0 (Q7.8)".to_string(),
        y_label: "pixels".to_string(),
        series: vec![Series::new("avg error", '•', APPROX)
            .with_points(candidates().zip(trials.iter().map(|t| t.avg_abs_error)))],
        marker: Some(Marker {
            x: best.candidate_value as f64,
            y: best.avg_abs_error,
            label: format!("avg at optimal {:.2}", best.avg_abs_error),
        }),
    };

    Chart {
        title: "Optimization of lhTableApprox[0]".to_string(),
        panels: vec![max_panel, avg_panel],
        footer: None,
    }
}
