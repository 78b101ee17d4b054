//! Core types module - fixed-point formats and shared constants
//!
//! This crate defines the fixed-point conventions shared by every lookup table
//! and by the render-time consumers of those tables. It has no external
//! dependencies so it can be used from table generators, the approximator and
//! the plotting front end alike.
//!
//! # Fixed-point formats
//!
//! A fixed-point value is a signed integer `raw` interpreted as `raw / 2^F`:
//!
//! | Format | Storage | `F` | Range |
//! |--------|---------|-----|-------|
//! | Q1.7 | `i8` | 7 | -1.0 ..= 0.9921875 |
//! | Q7.8 | `i16` | 8 | -128.0 ..= 127.99609375 |
//! | Q8.8 | `i16` | 8 | same storage as Q7.8, used for inverse distances |
//!
//! Encoding rounds half away from zero (`+0.5` then truncate for positive
//! inputs). Encoding never clamps: each table applies its own documented
//! boundary fix instead.
//!
//! # Reference geometry
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `SCREEN_WIDTH` | 160 | Columns cast per frame |
//! | `SCREEN_HEIGHT` | 128 | Rows, also the numerator of the line height |
//! | `MAX_PERPWALLDIST_INT` | 12 | Integer distance brackets in the line-height table |
//! | `DELTA_DIST_STEPS` | 128 | Entries in the inverse-distance-step table |
//! | `SINE_MAX_DEGREES` | 90 | Last degree stored in the sine table |
//!
//! # Examples
//!
//! ```
//! use raylut_types::{QFormat, Q7_8};
//!
//! let d = Q7_8::from_f64(2.5);
//! assert_eq!(d.raw(), 640);
//! assert_eq!(d.int_part(), 2);
//! assert_eq!(d.frac_part(), 128);
//!
//! assert_eq!(QFormat::Q1_7.encode(0.5), 64);
//! assert!(!QFormat::Q1_7.fits(128));
//! ```

use std::fmt;

/// Screen width in columns (one ray per column).
pub const SCREEN_WIDTH: u16 = 160;

/// Screen height in rows.
pub const SCREEN_HEIGHT: u16 = 128;

/// Number of integer-distance brackets in the line-height table.
pub const MAX_PERPWALLDIST_INT: u8 = 12;

/// Hard capacity of a line-height table.
pub const MAX_BRACKETS: usize = 64;

/// Number of entries in the inverse-distance-step table.
pub const DELTA_DIST_STEPS: u16 = 128;

/// Last degree stored in the sine table (one quadrant).
pub const SINE_MAX_DEGREES: u16 = 90;

/// Amplitude of the sine table entries.
pub const SINE_AMPLITUDE: f64 = 255.0;

/// Q7.8 line height returned for walls closer than one unit.
pub const LINE_HEIGHT_SATURATED: i16 = 0x7FFF;

/// Calibrated value of the first line-height bracket for the reference geometry.
pub const CALIBRATED_NEAR_BRACKET: i16 = 30840;

/// Fractional bits of Q7.8 / Q8.8.
pub const Q7_8_SHIFT: u32 = 8;

/// Fractional bits of Q1.7.
pub const Q1_7_SHIFT: u32 = 7;

/// Mask selecting the fractional byte of a Q7.8 value.
pub const Q7_8_FRAC_MASK: i16 = 0xFF;

/// One fixed-point storage convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QFormat {
    /// Signed 8-bit, 7 fractional bits.
    Q1_7,
    /// Signed 16-bit, 8 fractional bits.
    Q7_8,
    /// Inverse-distance convention; shares Q7.8 storage.
    Q8_8,
}

impl QFormat {
    pub const fn frac_bits(self) -> u32 {
        match self {
            QFormat::Q1_7 => Q1_7_SHIFT,
            QFormat::Q7_8 | QFormat::Q8_8 => Q7_8_SHIFT,
        }
    }

    /// Width of the signed storage lane in bits.
    pub const fn storage_bits(self) -> u32 {
        match self {
            QFormat::Q1_7 => 8,
            QFormat::Q7_8 | QFormat::Q8_8 => 16,
        }
    }

    pub const fn min_raw(self) -> i32 {
        -(1 << (self.storage_bits() - 1))
    }

    pub const fn max_raw(self) -> i32 {
        (1 << (self.storage_bits() - 1)) - 1
    }

    /// Scale factor `2^F`.
    pub fn scale(self) -> f64 {
        (1u32 << self.frac_bits()) as f64
    }

    /// Encode a real value as `round(v * 2^F)`, rounding half away from zero.
    ///
    /// The result is not clamped; use [`QFormat::fits`] before narrowing.
    pub fn encode(self, v: f64) -> i32 {
        (v * self.scale()).round() as i32
    }

    pub fn decode(self, raw: i32) -> f64 {
        raw as f64 / self.scale()
    }

    /// Whether `raw` fits the signed storage lane.
    pub fn fits(self, raw: i32) -> bool {
        raw >= self.min_raw() && raw <= self.max_raw()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            QFormat::Q1_7 => "Q1.7",
            QFormat::Q7_8 => "Q7.8",
            QFormat::Q8_8 => "Q8.8",
        }
    }
}

impl fmt::Display for QFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Q7.8 fixed-point value (distances, line heights, angles).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Q7_8(i16);

impl Q7_8 {
    pub const ZERO: Q7_8 = Q7_8(0);
    pub const ONE: Q7_8 = Q7_8(1 << Q7_8_SHIFT);
    pub const MAX: Q7_8 = Q7_8(i16::MAX);

    pub const fn from_raw(raw: i16) -> Self {
        Self(raw)
    }

    /// Whole number `n` as Q7.8. Values outside -128..=127 wrap.
    pub const fn from_int(n: i16) -> Self {
        Self(n.wrapping_shl(Q7_8_SHIFT))
    }

    /// Round a real value into Q7.8, saturating at the i16 limits.
    pub fn from_f64(v: f64) -> Self {
        let raw = QFormat::Q7_8.encode(v);
        Self(raw.clamp(i16::MIN as i32, i16::MAX as i32) as i16)
    }

    pub const fn raw(self) -> i16 {
        self.0
    }

    /// Integer part (`raw >> 8`). Negative values report 0.
    pub const fn int_part(self) -> u8 {
        if self.0 < 0 {
            0
        } else {
            (self.0 >> Q7_8_SHIFT) as u8
        }
    }

    /// Fractional byte (`raw & 0xFF`), the interpolation weight in `0..256`.
    pub const fn frac_part(self) -> u8 {
        (self.0 & Q7_8_FRAC_MASK) as u8
    }

    /// Truncate toward negative infinity to a whole number.
    pub const fn to_int(self) -> i16 {
        self.0 >> Q7_8_SHIFT
    }

    pub fn to_f64(self) -> f64 {
        QFormat::Q7_8.decode(self.0 as i32)
    }
}

impl fmt::Display for Q7_8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.to_f64())
    }
}

/// Q1.7 fixed-point value (camera-plane offsets in -1.0..1.0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Q1_7(i8);

impl Q1_7 {
    pub const fn from_raw(raw: i8) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> i8 {
        self.0
    }

    /// Two's-complement negation (one's complement plus one).
    pub const fn negate(self) -> Self {
        Self(self.0.wrapping_neg())
    }

    pub fn to_f64(self) -> f64 {
        QFormat::Q1_7.decode(self.0 as i32)
    }
}

impl fmt::Display for Q1_7 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.to_f64())
    }
}
