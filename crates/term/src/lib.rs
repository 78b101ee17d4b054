//! Terminal chart module.
//!
//! Line charts of the error analysis and the calibration search, drawn
//! straight into the terminal. Charts are rendered into a simple framebuffer
//! that can be flushed to a terminal backend or dumped as plain text.
//!
//! Goals:
//! - Keep `core` deterministic and free of presentation code
//! - Render without I/O so chart layout can be unit-tested
//! - Redraw only changed cells when switching charts or resizing

pub mod chart;
pub mod fb;
pub mod plots;
pub mod renderer;

pub use raylut_core as core;
pub use raylut_types as types;

pub use chart::{Chart, ChartView, Marker, Panel, Series, Viewport};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use plots::{analysis_chart, calibration_chart};
pub use renderer::{encode_diff_into, encode_full_into, to_plain_text, TerminalRenderer};
