//! Camera, delta-distance and sine tables at the reference geometry.

use raylut::core::{CameraRayTable, DeltaDistTable, LutError, SineTable};
use raylut::types::{Q7_8, DELTA_DIST_STEPS, SCREEN_WIDTH, SINE_MAX_DEGREES};

const CAMERA_X: [i8; 81] = [
    0, 2, 3, 5, 6, 8, 10, 11, 13, 14, 16, 18, 19, 21, 22, 24, 26, 27, 29, 30, 32, 34, 35, 37, 38,
    40, 42, 43, 45, 46, 48, 50, 51, 53, 54, 56, 58, 59, 61, 62, 64, 66, 67, 69, 70, 72, 74, 75,
    77, 78, 80, 82, 83, 85, 86, 88, 90, 91, 93, 94, 96, 98, 99, 101, 102, 104, 106, 107, 109, 110,
    112, 114, 115, 117, 118, 120, 122, 123, 125, 126, 127,
];

const SINE: [u8; 91] = [
    0, 4, 9, 13, 18, 22, 27, 31, 35, 40, 44, 49, 53, 57, 62, 66, 70, 75, 79, 83, 87, 91, 96, 100,
    104, 108, 112, 116, 120, 124, 127, 131, 135, 139, 143, 146, 150, 153, 157, 160, 164, 167, 171,
    174, 177, 180, 183, 186, 190, 192, 195, 198, 201, 204, 206, 209, 211, 214, 216, 219, 221, 223,
    225, 227, 229, 231, 233, 235, 236, 238, 240, 241, 243, 244, 245, 246, 247, 248, 249, 250, 251,
    252, 253, 253, 254, 254, 254, 255, 255, 255, 255,
];

#[test]
fn test_camera_table_matches_reference() {
    let table = CameraRayTable::build(SCREEN_WIDTH).unwrap();
    assert_eq!(table.entries(), &CAMERA_X);
}

#[test]
fn test_camera_x_mirrors_left_half() {
    let table = CameraRayTable::build(SCREEN_WIDTH).unwrap();
    assert_eq!(table.camera_x(80).raw(), 0);
    assert_eq!(table.camera_x(81).raw(), 2);
    assert_eq!(table.camera_x(79).raw(), -2);
    assert_eq!(table.camera_x(0).raw(), -127);
    assert_eq!(table.camera_x(159).raw(), 126);
    assert_eq!(table.camera_x(160).raw(), 127);
    for column in 1..80u16 {
        assert_eq!(
            table.camera_x(80 - column).raw(),
            -table.camera_x(80 + column).raw()
        );
    }
}

#[test]
fn test_camera_rejects_odd_width() {
    assert_eq!(
        CameraRayTable::build(161).unwrap_err(),
        LutError::ScreenWidth(161)
    );
    assert_eq!(CameraRayTable::build(0).unwrap_err(), LutError::ScreenWidth(0));
}

#[test]
fn test_delta_dist_table_matches_reference() {
    let table = DeltaDistTable::build(DELTA_DIST_STEPS).unwrap();
    let entries = table.entries();
    assert_eq!(entries.len(), 128);
    assert_eq!(
        &entries[..16],
        &[32767, 16384, 10923, 8192, 6554, 5461, 4681, 4096, 3641, 3277, 2979, 2731, 2521, 2341, 2185, 2048]
    );
    assert_eq!(entries[63], 512);
    assert_eq!(entries[64], 504);
    assert_eq!(&entries[120..], &[271, 269, 266, 264, 262, 260, 258, 256]);
}

#[test]
fn test_delta_dist_lookup() {
    let table = DeltaDistTable::build(DELTA_DIST_STEPS).unwrap();
    assert_eq!(table.delta_dist(Q7_8::ZERO), 32767);
    assert_eq!(table.delta_dist(Q7_8::ONE), 256);
    assert_eq!(table.delta_dist(Q7_8::from_raw(128)), 504);
    assert_eq!(table.delta_dist(Q7_8::from_raw(-128)), 512);
    // Saturated directions clamp to the last entry.
    assert_eq!(table.delta_dist(Q7_8::from_int(2)), 256);
}

#[test]
fn test_delta_dist_overflow_is_reported() {
    assert!(matches!(
        DeltaDistTable::build(256),
        Err(LutError::Overflow { index: 1, raw: 32768, .. })
    ));
    assert_eq!(DeltaDistTable::build(0).unwrap_err(), LutError::EmptySteps);
}

#[test]
fn test_sine_table_matches_reference() {
    let table = SineTable::build(SINE_MAX_DEGREES).unwrap();
    assert_eq!(table.entries(), &SINE);
    assert!(table.covers_quarter_wave());
}

#[test]
fn test_sine_quadrants() {
    let table = SineTable::build(SINE_MAX_DEGREES).unwrap();
    let sin = |d: i32| table.sin_deg(d).unwrap().raw();
    let cos = |d: i32| table.cos_deg(d).unwrap().raw();

    assert_eq!(sin(30), 127);
    assert_eq!(sin(150), 127);
    assert_eq!(sin(210), -127);
    assert_eq!(sin(330), -127);
    assert_eq!(sin(-30), -127);
    assert_eq!(sin(390), 127);
    assert_eq!(cos(0), 255);
    assert_eq!(cos(60), 127);
    assert_eq!(cos(180), -255);
}

#[test]
fn test_partial_sine_table() {
    let table = SineTable::build(45).unwrap();
    assert_eq!(table.entries().len(), 46);
    assert!(!table.covers_quarter_wave());
    assert_eq!(table.sin_deg(45).map(Q7_8::raw), Some(180));
    assert_eq!(table.sin_deg(60), None);
    assert_eq!(SineTable::build(91).unwrap_err(), LutError::SineDegrees(91));
}
