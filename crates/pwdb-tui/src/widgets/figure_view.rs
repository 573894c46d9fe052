//! Whole-figure widget: visible panes plus free text

use pwdb_app::{Figure, HorizontalAlign, TextAnnotation, VerticalAlign};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Widget};

use super::PaneChart;
use crate::layout::{cell_area, relative_position, split_figure};
use crate::theme::palette;

/// Renders every visible pane in its grid cell and the figure texts on top
pub struct FigureView<'a> {
    figure: &'a Figure,
}

impl<'a> FigureView<'a> {
    pub fn new(figure: &'a Figure) -> Self {
        Self { figure }
    }
}

fn text_style(text: &TextAnnotation) -> Style {
    let color = if text.alpha < palette::FAINT_ALPHA {
        palette::TEXT_MUTED
    } else {
        palette::named_color(&text.color)
    };
    Style::default().fg(color)
}

/// Draw `text` anchored at its relative position
fn render_text(text: &TextAnnotation, area: Rect, buf: &mut Buffer) {
    if area.is_empty() || text.content.is_empty() {
        return;
    }
    let (anchor_x, anchor_y) = relative_position(area, text.x, text.y);
    let lines: Vec<&str> = text.content.lines().collect();
    let height = lines.len() as u16;

    let top = match text.v_align {
        VerticalAlign::Top => anchor_y,
        VerticalAlign::Center => anchor_y.saturating_sub(height / 2),
        VerticalAlign::Bottom => anchor_y.saturating_sub(height.saturating_sub(1)),
    }
    .max(area.y);

    for (i, line) in lines.iter().enumerate() {
        let y = top + i as u16;
        if y >= area.bottom() {
            break;
        }
        let width = (line.chars().count() as u16).min(area.width);
        let x = match text.h_align {
            HorizontalAlign::Left => anchor_x,
            HorizontalAlign::Center => anchor_x.saturating_sub(width / 2),
            HorizontalAlign::Right => anchor_x.saturating_sub(width.saturating_sub(1)),
        }
        .clamp(area.x, area.right() - width);
        buf.set_stringn(x, y, line, area.right().saturating_sub(x) as usize, text_style(text));
    }
}

impl Widget for FigureView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .style(Style::default().bg(palette::FIGURE_BG))
            .render(area, buf);

        let areas = split_figure(area);
        for (_, axes) in self.figure.visible_panes() {
            let pane_area = cell_area(areas.plot, axes.cell);
            if !pane_area.is_empty() {
                PaneChart::new(axes).render(pane_area, buf);
            }
        }

        for text in self.figure.texts() {
            render_text(text, area, buf);
        }
    }
}
