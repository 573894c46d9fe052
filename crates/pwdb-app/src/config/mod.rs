//! Configuration file parsing for the PWDB tools
//!
//! Supports:
//! - `.pwdb/config.toml` - plot defaults, figure export size and display toggles

pub mod settings;
pub mod types;

pub use settings::{config_path, load_settings};
pub use types::*;
