//! ChartView: maps line charts into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::fb::{CellStyle, FrameBuffer, Rgb};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// One plotted line, drawn as a glyph per sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub points: Vec<(f64, f64)>,
    pub glyph: char,
    pub color: Rgb,
}

impl Series {
    pub fn new(label: impl Into<String>, glyph: char, color: Rgb) -> Self {
        Self {
            label: label.into(),
            points: Vec::new(),
            glyph,
            color,
        }
    }

    pub fn with_points(mut self, points: impl IntoIterator<Item = (f64, f64)>) -> Self {
        self.points.extend(points);
        self
    }
}

/// Highlighted point, e.g. the calibration optimum.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub x: f64,
    pub y: f64,
    pub label: String,
}

/// One set of axes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Panel {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<Series>,
    pub marker: Option<Marker>,
}

/// Vertically stacked panels under a common title.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Chart {
    pub title: String,
    pub panels: Vec<Panel>,
    pub footer: Option<String>,
}

const BORDER: Rgb = Rgb::new(150, 150, 160);
const LABEL: Rgb = Rgb::new(180, 180, 190);
const MARKER: Rgb = Rgb::new(240, 80, 80);

/// Smallest panel that still gets a frame and plot area.
const MIN_PANEL_ROWS: u16 = 6;

/// Lightweight line-chart renderer.
pub struct ChartView {
    /// Columns reserved left of the frame for y tick labels.
    margin_left: u16,
}

impl Default for ChartView {
    fn default() -> Self {
        Self { margin_left: 9 }
    }
}

impl ChartView {
    pub fn new(margin_left: u16) -> Self {
        Self { margin_left }
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, chart: &Chart, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));
        if viewport.width == 0 || viewport.height == 0 {
            return;
        }

        let title = CellStyle::default().bold();
        let title_x = viewport
            .width
            .saturating_sub(chart.title.chars().count() as u16)
            / 2;
        fb.put_str(title_x, 0, &chart.title, title);

        let mut bottom = viewport.height;
        if let Some(footer) = &chart.footer {
            bottom = bottom.saturating_sub(1);
            fb.put_str(0, bottom, footer, CellStyle::fg(LABEL).dim());
        }

        if chart.panels.is_empty() {
            return;
        }
        let rows = bottom.saturating_sub(1);
        let panel_h = rows / chart.panels.len() as u16;
        for (i, panel) in chart.panels.iter().enumerate() {
            let y0 = 1 + panel_h * i as u16;
            self.draw_panel(fb, panel, y0, viewport.width, panel_h);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, chart: &Chart, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(chart, viewport, &mut fb);
        fb
    }

    fn draw_panel(&self, fb: &mut FrameBuffer, panel: &Panel, y0: u16, width: u16, height: u16) {
        fb.put_str(self.margin_left, y0, &panel.title, CellStyle::default().bold());
        self.draw_legend(fb, panel, y0, width);

        if height < MIN_PANEL_ROWS || width < self.margin_left + 4 {
            return;
        }

        let left = self.margin_left;
        let right = width - 1;
        let top = y0 + 1;
        let frame_bottom = y0 + height - 3;
        let border = CellStyle::fg(BORDER);
        draw_frame(fb, left, top, right, frame_bottom, border);

        let inner_x = left + 1;
        let inner_w = right - left - 1;
        let inner_top = top + 1;
        let inner_bottom = frame_bottom - 1;
        let inner_h = inner_bottom + 1 - inner_top;

        let (x_range, y_range) = extents(panel);
        let label = CellStyle::fg(LABEL);

        // Axis extents.
        let tick_right = left.saturating_sub(1);
        fb.put_str(0, top, &truncate(&panel.y_label, left as usize), label.dim());
        fb.put_str_right(tick_right, inner_top, &fmt_tick(y_range.1), label);
        fb.put_str_right(tick_right, inner_bottom, &fmt_tick(y_range.0), label);
        let x_row = frame_bottom + 1;
        fb.put_str(inner_x, x_row, &fmt_tick(x_range.0), label);
        fb.put_str_right(right - 1, x_row, &fmt_tick(x_range.1), label);
        let x_label_x = inner_x + inner_w.saturating_sub(panel.x_label.chars().count() as u16) / 2;
        fb.put_str(x_label_x, x_row, &panel.x_label, label.dim());

        let to_cell = |x: f64, y: f64| -> Option<(u16, u16)> {
            if !x.is_finite() || !y.is_finite() {
                return None;
            }
            let fx = (x - x_range.0) / (x_range.1 - x_range.0);
            let fy = (y - y_range.0) / (y_range.1 - y_range.0);
            let cx = inner_x + (fx * (inner_w - 1) as f64).round() as u16;
            let cy = inner_bottom - (fy * (inner_h - 1) as f64).round() as u16;
            Some((cx, cy))
        };

        for series in &panel.series {
            let style = CellStyle::fg(series.color);
            for &(x, y) in &series.points {
                if let Some((cx, cy)) = to_cell(x, y) {
                    fb.put_char(cx, cy, series.glyph, style);
                }
            }
        }

        if let Some((cx, cy)) = panel.marker.as_ref().and_then(|m| to_cell(m.x, m.y)) {
            fb.put_char(cx, cy, 'O', CellStyle::fg(MARKER).bold());
        }
    }

    /// Legend entries right-aligned on the panel title row.
    fn draw_legend(&self, fb: &mut FrameBuffer, panel: &Panel, y: u16, width: u16) {
        let mut right = width.saturating_sub(1);
        if let Some(marker) = &panel.marker {
            let text = format!("O {}", marker.label);
            fb.put_str_right(right, y, &text, CellStyle::fg(MARKER));
            right = right.saturating_sub(text.chars().count() as u16 + 2);
        }
        for series in panel.series.iter().rev() {
            let text = format!("{} {}", series.glyph, series.label);
            fb.put_str_right(right, y, &text, CellStyle::fg(series.color));
            right = right.saturating_sub(text.chars().count() as u16 + 2);
        }
    }
}

fn draw_frame(fb: &mut FrameBuffer, left: u16, top: u16, right: u16, bottom: u16, style: CellStyle) {
    let w = right - left - 1;
    let h = bottom - top - 1;
    fb.put_char(left, top, '┌', style);
    fb.put_char(right, top, '┐', style);
    fb.put_char(left, bottom, '└', style);
    fb.put_char(right, bottom, '┘', style);
    fb.hline(left + 1, top, w, '─', style);
    fb.hline(left + 1, bottom, w, '─', style);
    fb.vline(left, top + 1, h, '│', style);
    fb.vline(right, top + 1, h, '│', style);
}

/// Data extents of a panel, widened so neither span is zero.
fn extents(panel: &Panel) -> ((f64, f64), (f64, f64)) {
    let points = panel
        .series
        .iter()
        .flat_map(|s| s.points.iter().copied())
        .chain(panel.marker.iter().map(|m| (m.x, m.y)))
        .filter(|(x, y)| x.is_finite() && y.is_finite());

    let mut x_range = (f64::INFINITY, f64::NEG_INFINITY);
    let mut y_range = (f64::INFINITY, f64::NEG_INFINITY);
    for (x, y) in points {
        x_range = (x_range.0.min(x), x_range.1.max(x));
        y_range = (y_range.0.min(y), y_range.1.max(y));
    }
    (widen(x_range), widen(y_range))
}

fn widen((lo, hi): (f64, f64)) -> (f64, f64) {
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    if hi - lo < f64::EPSILON {
        return (lo, lo + 1.0);
    }
    (lo, hi)
}

fn fmt_tick(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e7 {
        format!("{:.0}", v)
    } else {
        format!("{:.2}", v)
    }
}

fn truncate(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
