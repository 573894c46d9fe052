//! Custom widget components

mod figure_view;
mod pane_chart;

pub use figure_view::FigureView;
pub use pane_chart::PaneChart;
