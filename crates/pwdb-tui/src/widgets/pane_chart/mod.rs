//! Line chart widget for one figure pane.
//!
//! Renders every series of an [`Axes`] as braille lines over shared
//! bounds, with tick labels on both axes, optional dotted grid lines and
//! an optional legend.
//!
//! # Layout
//!
//! ```text
//! ┌ pwdb_0001: Radial_P (Left Radial Artery) ───────────┐
//! │mmHg   ■ Complete  ■ ACoA                            │
//! │  120.00┤      ⣀⠤⠒⠉⠉⠒⠤⣀                              │
//! │   95.00┤   ⣀⠔⠁        ⠈⠢⣀                           │
//! │   70.00┤⠤⠊               ⠑⠤⠤⠤⠤⠤⠤                    │
//! │        └┬───────────────────┬──────────────────────┬│
//! │         0.00               0.45                0.90 │
//! │                       Time (s)                      │
//! └─────────────────────────────────────────────────────┘
//! ```

mod axis;
mod braille_canvas;


use axis::{render_grid, render_x_axis, render_y_axis, x_ticks, y_ticks, PlotBounds};
use braille_canvas::BrailleCanvas;

use pwdb_app::{Axes, Series};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Widget};

use crate::theme::palette;

// ── Layout constants ──────────────────────────────────────────────────────────

const HEADER_HEIGHT: u16 = 1;
/// Axis line, tick labels and x label
const X_AXIS_HEIGHT: u16 = 3;
/// Y tick labels plus the axis line column
const Y_AXIS_WIDTH: u16 = 9;
const MIN_PLOT_WIDTH: u16 = 4;
const MIN_PLOT_HEIGHT: u16 = 2;
const MIN_WIDTH_FOR_MID_TICK: u16 = 30;
/// Fraction of the y range added above and below the data
const Y_PADDING: f64 = 0.05;

/// Areas within the chart's border
#[derive(Debug, Clone, Copy)]
pub(super) struct ChartLayout {
    header: Rect,
    y_labels: Rect,
    axis_x: u16,
    plot: Rect,
    axis_row: u16,
    ticks_row: u16,
    label_row: u16,
}

impl ChartLayout {
    /// `None` when `inner` is too small to hold a plot
    fn new(inner: Rect) -> Option<Self> {
        if inner.width < Y_AXIS_WIDTH + MIN_PLOT_WIDTH
            || inner.height < HEADER_HEIGHT + X_AXIS_HEIGHT + MIN_PLOT_HEIGHT
        {
            return None;
        }
        let plot_top = inner.y + HEADER_HEIGHT;
        let plot_height = inner.height - HEADER_HEIGHT - X_AXIS_HEIGHT;
        let axis_row = plot_top + plot_height;

        Some(Self {
            header: Rect::new(inner.x, inner.y, inner.width, HEADER_HEIGHT),
            y_labels: Rect::new(inner.x, plot_top, Y_AXIS_WIDTH - 1, plot_height),
            axis_x: inner.x + Y_AXIS_WIDTH - 1,
            plot: Rect::new(
                inner.x + Y_AXIS_WIDTH,
                plot_top,
                inner.width - Y_AXIS_WIDTH,
                plot_height,
            ),
            axis_row,
            ticks_row: axis_row + 1,
            label_row: axis_row + 2,
        })
    }
}

/// Chart of a single pane
pub struct PaneChart<'a> {
    axes: &'a Axes,
}

impl<'a> PaneChart<'a> {
    pub fn new(axes: &'a Axes) -> Self {
        Self { axes }
    }
}

/// Y label followed by the legend entries
fn render_header(axes: &Axes, area: Rect, buf: &mut Buffer) {
    let mut spans = vec![Span::styled(
        axes.y_label.clone(),
        Style::default().fg(palette::AXIS_LABEL),
    )];
    if axes.legend && !axes.series.is_empty() {
        spans.push(Span::raw("   "));
        for (i, series) in axes.series.iter().enumerate() {
            spans.push(Span::styled(
                format!("\u{25A0} {}  ", series.label),
                Style::default().fg(palette::series_color(i)),
            ));
        }
    }
    buf.set_line(area.x, area.y, &Line::from(spans), area.width);
}

/// Connect consecutive finite points; NaN gaps break the line
fn draw_series(series: &Series, bounds: &PlotBounds, canvas: &mut BrailleCanvas) {
    let (dot_w, dot_h) = (canvas.dot_width(), canvas.dot_height());
    let mut previous = None;
    for &(x, y) in &series.points {
        if !(x.is_finite() && y.is_finite()) {
            previous = None;
            continue;
        }
        let dot = bounds.to_dot(x, y, dot_w, dot_h);
        match previous {
            Some(from) => canvas.line(from, dot),
            None => canvas.set(dot.0, dot.1),
        }
        previous = Some(dot);
    }
}

impl Widget for PaneChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette::BORDER));
        if !self.axes.title.is_empty() {
            block = block.title(Span::styled(
                format!(" {} ", self.axes.title),
                Style::default()
                    .fg(palette::TITLE)
                    .add_modifier(Modifier::BOLD),
            ));
        }
        let inner = block.inner(area);
        block.render(area, buf);

        let Some(layout) = ChartLayout::new(inner) else {
            return;
        };
        render_header(self.axes, layout.header, buf);

        let Some(bounds) = PlotBounds::from_axes(self.axes) else {
            let message = "No data";
            let x = layout.plot.x + layout.plot.width.saturating_sub(message.len() as u16) / 2;
            let y = layout.plot.y + layout.plot.height / 2;
            buf.set_string(x, y, message, Style::default().fg(palette::TEXT_MUTED));
            return;
        };

        let y_ticks = y_ticks(&bounds, layout.plot);
        let x_ticks = x_ticks(&bounds, layout.plot);
        if self.axes.grid {
            render_grid(&y_ticks, &x_ticks, layout.plot, buf);
        }
        render_y_axis(&y_ticks, &layout, buf);
        render_x_axis(&x_ticks, &self.axes.x_label, &layout, buf);

        for (i, series) in self.axes.series.iter().enumerate() {
            let mut canvas =
                BrailleCanvas::new(layout.plot.width as usize, layout.plot.height as usize);
            draw_series(series, &bounds, &mut canvas);
            canvas.render_to_buffer(buf, layout.plot, palette::series_color(i));
        }
    }
}
