//! Braille-based plotting canvas for pane charts.
//!
//! Each terminal character cell represents a 2x4 grid of braille dots,
//! providing 2x horizontal and 4x vertical sub-character resolution.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};

/// Braille dot bit positions indexed by [y % 4][x % 2].
///
/// ```text
/// Dot 1 (0x01) | Dot 4 (0x08)
/// Dot 2 (0x02) | Dot 5 (0x10)
/// Dot 3 (0x04) | Dot 6 (0x20)
/// Dot 7 (0x40) | Dot 8 (0x80)
/// ```
pub(super) const BRAILLE_BIT_MAP: [[u8; 2]; 4] = [
    [0x01, 0x08],
    [0x02, 0x10],
    [0x04, 0x20],
    [0x40, 0x80],
];

/// A simple braille-based plotting canvas.
///
/// Coordinates are in "dot space": x ranges 0..width*2, y ranges
/// 0..height*4, with y = 0 at the top.
pub(super) struct BrailleCanvas {
    /// Braille dot-pattern offset per cell: cells[row][col].
    pub(super) cells: Vec<Vec<u8>>,
    pub(super) width: usize,
    pub(super) height: usize,
}

impl BrailleCanvas {
    pub(super) fn new(width: usize, height: usize) -> Self {
        Self {
            cells: vec![vec![0u8; width]; height],
            width,
            height,
        }
    }

    pub(super) fn dot_width(&self) -> usize {
        self.width * 2
    }

    pub(super) fn dot_height(&self) -> usize {
        self.height * 4
    }

    /// Set a dot; out-of-bounds coordinates are ignored.
    pub(super) fn set(&mut self, x: usize, y: usize) {
        let col = x / 2;
        let row = y / 4;
        if col >= self.width || row >= self.height {
            return;
        }
        self.cells[row][col] |= BRAILLE_BIT_MAP[y % 4][x % 2];
    }

    /// Draw a straight segment between two dots (Bresenham)
    pub(super) fn line(&mut self, from: (usize, usize), to: (usize, usize)) {
        let (mut x, mut y) = (from.0 as i64, from.1 as i64);
        let (x1, y1) = (to.0 as i64, to.1 as i64);
        let dx = (x1 - x).abs();
        let dy = -(y1 - y).abs();
        let sx = if x < x1 { 1 } else { -1 };
        let sy = if y < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.set(x as usize, y as usize);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Render non-empty cells into `buf`, all in `color`.
    ///
    /// Overlapping series are drawn with one canvas each; the last one
    /// rendered wins a shared cell.
    pub(super) fn render_to_buffer(&self, buf: &mut Buffer, area: Rect, color: Color) {
        let style = Style::default().fg(color);
        for (row, cells) in self.cells.iter().enumerate() {
            let y = area.y + row as u16;
            if y >= area.bottom() {
                break;
            }
            for (col, bits) in cells.iter().enumerate() {
                let x = area.x + col as u16;
                if x >= area.right() {
                    break;
                }
                if *bits != 0 {
                    let ch = char::from_u32(0x2800 + *bits as u32).unwrap_or('\u{2800}');
                    if let Some(cell) = buf.cell_mut((x, y)) {
                        cell.set_char(ch).set_style(style);
                    }
                }
            }
        }
    }
}
