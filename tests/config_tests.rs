//! Loading `LutConfig` from JSON files.

use std::fs;

use raylut::config::LutConfig;
use raylut::core::{StepRange, TableParams, TableSet};

#[test]
fn test_missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    let err = LutConfig::load(&path).unwrap_err();
    assert!(format!("{err:#}").contains("absent.json"));
}

#[test]
fn test_partial_config_keeps_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("raylut.json");
    fs::write(
        &path,
        r#"{ "tables": { "line_height_override": 31000 }, "analysis": { "start": 256, "end": 1024, "step": 8 } }"#,
    )
    .unwrap();

    let config = LutConfig::load(&path).unwrap();
    assert_eq!(config.tables.line_height_override, 31000);
    assert_eq!(config.tables.screen_width, 160);
    assert_eq!(config.analysis, StepRange::new(256, 1024, 8));
    assert_eq!(config.calibration, LutConfig::default().calibration);
}

#[test]
fn test_round_trip_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("raylut.json");
    let config = LutConfig {
        tables: TableParams {
            sine_max_degrees: 45,
            ..TableParams::default()
        },
        ..LutConfig::default()
    };
    fs::write(&path, config.to_json_pretty().unwrap()).unwrap();
    assert_eq!(LutConfig::load(&path).unwrap(), config);
}

#[test]
fn test_malformed_json_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ tables: ").unwrap();
    let err = LutConfig::load(&path).unwrap_err();
    assert!(format!("{err:#}").contains("invalid JSON"));
}

#[test]
fn test_geometry_mismatch_is_rejected() {
    let text = r#"{ "calibration": { "max_int_distance": 8 } }"#;
    let err = LutConfig::from_json(text).unwrap_err();
    assert!(err.to_string().contains("max_int_distance"));
}

#[test]
fn test_default_config_generates_reference_tables() {
    let config = LutConfig::default();
    config.validate().unwrap();
    let tables = TableSet::generate(&config.tables).unwrap();
    assert_eq!(tables.line_height.entries()[0], 30840);
}
