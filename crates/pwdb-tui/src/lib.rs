//! pwdb-tui - Terminal frontend for PWDB figures
//!
//! This crate provides the ratatui-based display of a [`pwdb_app::Figure`]:
//! a [`TerminalSurface`] that the sequence controller pages through, the
//! chart widgets it draws with, and plain-text export of single panes.

pub mod event;
pub mod export;
pub mod layout;
pub mod surface;
pub mod terminal;
pub mod theme;
pub mod widgets;

// Re-export main entry points
pub use export::FigureExporter;
pub use surface::TerminalSurface;
pub use terminal::install_panic_hook;
