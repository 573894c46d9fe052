//! Figure layout calculations
//!
//! Panes occupy cells of their subplot grid within the plot area; the
//! last row of the screen is kept free for figure-level text such as the
//! navigation indicator.

use pwdb_app::GridCell;
use ratatui::layout::{Constraint, Layout, Rect};

/// Rows reserved below the panes
pub const FOOTER_HEIGHT: u16 = 1;

/// Screen areas of a figure
#[derive(Debug, Clone, Copy)]
pub struct FigureAreas {
    /// Area shared by the pane grids
    pub plot: Rect,

    /// Bottom row for figure text
    pub footer: Rect,
}

pub fn split_figure(area: Rect) -> FigureAreas {
    let chunks = Layout::vertical([Constraint::Min(0), Constraint::Length(FOOTER_HEIGHT)]).split(area);
    FigureAreas {
        plot: chunks[0],
        footer: chunks[1],
    }
}

/// Area of `cell` within `area`; empty for a cell outside its grid
pub fn cell_area(area: Rect, cell: GridCell) -> Rect {
    if cell.row >= cell.nrows || cell.col >= cell.ncols {
        return Rect::new(area.x, area.y, 0, 0);
    }

    let rows = Layout::vertical(
        (0..cell.nrows).map(|_| Constraint::Ratio(1, u32::from(cell.nrows))),
    )
    .split(area);
    let cols = Layout::horizontal(
        (0..cell.ncols).map(|_| Constraint::Ratio(1, u32::from(cell.ncols))),
    )
    .split(rows[cell.row as usize]);
    cols[cell.col as usize]
}

/// Terminal cell for a point in relative figure coordinates
///
/// `x` and `y` run from 0.0 to 1.0 with the origin at the bottom left.
pub fn relative_position(area: Rect, x: f64, y: f64) -> (u16, u16) {
    let span_x = f64::from(area.width.saturating_sub(1));
    let span_y = f64::from(area.height.saturating_sub(1));
    let col = (x.clamp(0.0, 1.0) * span_x).round() as u16;
    let row = ((1.0 - y.clamp(0.0, 1.0)) * span_y).round() as u16;
    (area.x + col, area.y + row)
}
