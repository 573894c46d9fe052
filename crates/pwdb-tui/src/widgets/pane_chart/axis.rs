//! Axis bounds, tick labels and axis line rendering.

use super::*;

/// Value ranges mapped onto the plot area
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct PlotBounds {
    pub(super) x: [f64; 2],
    pub(super) y: [f64; 2],
}

impl PlotBounds {
    /// Data bounds with the y range padded by [`Y_PADDING`] on each side
    pub(super) fn from_axes(axes: &Axes) -> Option<Self> {
        let (mut x, [y0, y1]) = axes.data_bounds()?;
        if x[1] - x[0] <= f64::EPSILON {
            x = [x[0] - 0.5, x[1] + 0.5];
        }
        let pad = if y1 - y0 <= f64::EPSILON {
            y0.abs().max(1.0) * Y_PADDING
        } else {
            (y1 - y0) * Y_PADDING
        };
        Some(Self {
            x,
            y: [y0 - pad, y1 + pad],
        })
    }

    /// Dot-space position of a data point on a `dot_w` x `dot_h` canvas
    pub(super) fn to_dot(&self, x: f64, y: f64, dot_w: usize, dot_h: usize) -> (usize, usize) {
        let fx = ((x - self.x[0]) / (self.x[1] - self.x[0])).clamp(0.0, 1.0);
        let fy = ((y - self.y[0]) / (self.y[1] - self.y[0])).clamp(0.0, 1.0);
        let dx = (fx * dot_w.saturating_sub(1) as f64).round() as usize;
        let dy = (fy * dot_h.saturating_sub(1) as f64).round() as usize;
        (dx, dot_h.saturating_sub(1).saturating_sub(dy))
    }
}

/// Tick label text: two decimals, or scientific for very large/small values
pub(super) fn format_tick(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-2..1e5).contains(&magnitude) {
        format!("{value:.1e}")
    } else {
        format!("{value:.2}")
    }
}

/// Rows of the y ticks (top, middle, bottom) with their values
pub(super) fn y_ticks(bounds: &PlotBounds, plot: Rect) -> Vec<(u16, f64)> {
    let last = plot.height.saturating_sub(1);
    let mut ticks = vec![(plot.y, bounds.y[1])];
    if plot.height >= 5 {
        let mid = last / 2;
        let value = bounds.y[1] - (bounds.y[1] - bounds.y[0]) * f64::from(mid) / f64::from(last);
        ticks.push((plot.y + mid, value));
    }
    if last > 0 {
        ticks.push((plot.y + last, bounds.y[0]));
    }
    ticks
}

/// Columns of the x ticks (left, middle, right) with their values
pub(super) fn x_ticks(bounds: &PlotBounds, plot: Rect) -> Vec<(u16, f64)> {
    let last = plot.width.saturating_sub(1);
    let mut ticks = vec![(plot.x, bounds.x[0])];
    if plot.width >= MIN_WIDTH_FOR_MID_TICK {
        let mid = last / 2;
        let value = bounds.x[0] + (bounds.x[1] - bounds.x[0]) * f64::from(mid) / f64::from(last);
        ticks.push((plot.x + mid, value));
    }
    if last > 0 {
        ticks.push((plot.x + last, bounds.x[1]));
    }
    ticks
}

/// Y tick labels and the vertical axis line
pub(super) fn render_y_axis(ticks: &[(u16, f64)], layout: &ChartLayout, buf: &mut Buffer) {
    let label_style = Style::default().fg(palette::AXIS_LABEL);
    let axis_style = Style::default().fg(palette::AXIS);
    let label_width = layout.y_labels.width as usize;

    for row in layout.plot.y..layout.plot.bottom() {
        let symbol = if ticks.iter().any(|(r, _)| *r == row) {
            "┤"
        } else {
            "│"
        };
        buf.set_string(layout.axis_x, row, symbol, axis_style);
    }

    for (row, value) in ticks {
        let mut label = format!("{:>width$}", format_tick(*value), width = label_width);
        label.truncate(label_width);
        buf.set_stringn(layout.y_labels.x, *row, &label, label_width, label_style);
    }
}

/// Horizontal axis line, x tick labels and the x label
pub(super) fn render_x_axis(
    ticks: &[(u16, f64)],
    x_label: &str,
    layout: &ChartLayout,
    buf: &mut Buffer,
) {
    let label_style = Style::default().fg(palette::AXIS_LABEL);
    let axis_style = Style::default().fg(palette::AXIS);
    let plot = layout.plot;

    buf.set_string(layout.axis_x, layout.axis_row, "└", axis_style);
    for col in plot.x..plot.right() {
        let symbol = if ticks.iter().any(|(c, _)| *c == col) {
            "┬"
        } else {
            "─"
        };
        buf.set_string(col, layout.axis_row, symbol, axis_style);
    }

    let count = ticks.len();
    for (i, (col, value)) in ticks.iter().enumerate() {
        let label = format_tick(*value);
        let len = label.chars().count() as u16;
        let start = if i == 0 {
            *col
        } else if i + 1 == count {
            col.saturating_sub(len.saturating_sub(1))
        } else {
            col.saturating_sub(len / 2)
        };
        let start = start.max(plot.x);
        let available = plot.right().saturating_sub(start) as usize;
        buf.set_stringn(start, layout.ticks_row, &label, available, label_style);
    }

    if !x_label.is_empty() {
        let len = x_label.chars().count() as u16;
        let start = plot.x + plot.width.saturating_sub(len) / 2;
        buf.set_stringn(start, layout.label_row, x_label, plot.width as usize, label_style);
    }
}

/// Dotted grid lines through every tick
pub(super) fn render_grid(
    y_ticks: &[(u16, f64)],
    x_ticks: &[(u16, f64)],
    plot: Rect,
    buf: &mut Buffer,
) {
    let mut canvas = BrailleCanvas::new(plot.width as usize, plot.height as usize);
    for (row, _) in y_ticks {
        let dot_y = (row - plot.y) as usize * 4 + 3;
        for dot_x in (0..canvas.dot_width()).step_by(4) {
            canvas.set(dot_x, dot_y);
        }
    }
    for (col, _) in x_ticks {
        let dot_x = (col - plot.x) as usize * 2;
        for dot_y in (0..canvas.dot_height()).step_by(4) {
            canvas.set(dot_x, dot_y);
        }
    }
    canvas.render_to_buffer(buf, plot, palette::GRID);
}
