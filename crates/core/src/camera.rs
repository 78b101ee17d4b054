//! Camera-plane offsets per screen column in Q1.7.
//!
//! Only the right half of the screen is stored: `camX = 2x / width - 1` for
//! `x = width/2 ..= width`. The left half is the negation of its mirror.

use crate::error::{LutError, Result};
use crate::types::{QFormat, Q1_7};

const TABLE: &str = "cameraXtable";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraRayTable {
    entries: Vec<i8>,
    screen_width: u16,
}

impl CameraRayTable {
    /// Build the table for an even, non-zero screen width (`width/2 + 1` entries).
    ///
    /// The last entry encodes `camX = 1.0`, which rounds to 128 and does not
    /// fit an `i8`; it is lowered by one unit to 127.
    pub fn build(screen_width: u16) -> Result<Self> {
        if screen_width == 0 || screen_width % 2 != 0 {
            return Err(LutError::ScreenWidth(screen_width));
        }

        let half = screen_width / 2;
        let mut raws: Vec<i32> = (half..=screen_width)
            .map(|x| {
                let cam_x = (2.0 * x as f64 / screen_width as f64) - 1.0;
                QFormat::Q1_7.encode(cam_x)
            })
            .collect();

        if let Some(last) = raws.last_mut() {
            if *last > QFormat::Q1_7.max_raw() {
                *last -= 1;
            }
        }

        let entries = raws
            .into_iter()
            .enumerate()
            .map(|(index, raw)| {
                i8::try_from(raw).map_err(|_| LutError::Overflow {
                    table: TABLE,
                    index,
                    raw,
                    format: QFormat::Q1_7,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            entries,
            screen_width,
        })
    }

    pub fn entries(&self) -> &[i8] {
        &self.entries
    }

    pub fn screen_width(&self) -> u16 {
        self.screen_width
    }

    /// Camera-plane offset for `column` in `0..=screen_width`.
    ///
    /// # Panics
    ///
    /// Panics if `column > screen_width`; callers index per the table size.
    pub fn camera_x(&self, column: u16) -> Q1_7 {
        let half = self.screen_width / 2;
        if column < half {
            Q1_7::from_raw(self.entries[(half - column) as usize]).negate()
        } else {
            Q1_7::from_raw(self.entries[(column - half) as usize])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_odd_and_zero_width() {
        assert_eq!(CameraRayTable::build(0), Err(LutError::ScreenWidth(0)));
        assert_eq!(CameraRayTable::build(161), Err(LutError::ScreenWidth(161)));
    }

    #[test]
    fn test_left_half_mirrors_right_half() {
        let table = CameraRayTable::build(160).unwrap();
        for offset in 1..=80u16 {
            assert_eq!(
                table.camera_x(80 - offset).raw(),
                -table.camera_x(80 + offset).raw(),
                "offset {}",
                offset
            );
        }
    }

    #[test]
    fn test_tiny_screen() {
        let table = CameraRayTable::build(2).unwrap();
        assert_eq!(table.entries(), &[0, 127]);
        assert_eq!(table.camera_x(0).raw(), -127);
    }
}
