//! Color palette for figure rendering.

use std::str::FromStr;

use ratatui::style::Color;

// --- Frame ---
pub const FIGURE_BG: Color = Color::Reset;
pub const BORDER: Color = Color::DarkGray;
pub const TITLE: Color = Color::White;

// --- Axes ---
pub const AXIS: Color = Color::Gray;
pub const AXIS_LABEL: Color = Color::Gray;
pub const GRID: Color = Color::DarkGray;

// --- Text ---
pub const TEXT_PRIMARY: Color = Color::White;
pub const TEXT_MUTED: Color = Color::DarkGray;

/// Line colors, assigned to series in order and reused cyclically
pub const SERIES: [Color; 8] = [
    Color::Cyan,
    Color::Yellow,
    Color::Green,
    Color::Red,
    Color::Magenta,
    Color::Blue,
    Color::LightCyan,
    Color::LightYellow,
];

/// Color of the `index`-th series of a pane
pub fn series_color(index: usize) -> Color {
    SERIES[index % SERIES.len()]
}

/// Resolve a color name from a text annotation
///
/// Accepts anything ratatui can parse (`"gray"`, `"#808080"`, `"8"`);
/// unknown names fall back to [`TEXT_PRIMARY`].
pub fn named_color(name: &str) -> Color {
    Color::from_str(name).unwrap_or(TEXT_PRIMARY)
}

/// Annotations fainter than this are drawn in the muted color
pub const FAINT_ALPHA: f32 = 0.5;
