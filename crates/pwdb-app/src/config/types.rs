//! Configuration types for the PWDB tools
//!
//! Defines:
//! - `Settings` - Top-level settings (`.pwdb/config.toml`)
//! - `PlotSettings`, `ExportSettings`, `UiSettings` - its sections

use pwdb_core::SignalType;
use serde::{Deserialize, Serialize};

/// Application settings (.pwdb/config.toml)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub plot: PlotSettings,

    #[serde(default)]
    pub export: ExportSettings,

    #[serde(default)]
    pub ui: UiSettings,
}

/// Plot defaults
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PlotSettings {
    /// Signal types used with `--sites` and `--path` when `--types` is absent
    #[serde(default = "default_types")]
    pub types: Vec<SignalType>,
}

impl Default for PlotSettings {
    fn default() -> Self {
        Self {
            types: default_types(),
        }
    }
}

fn default_types() -> Vec<SignalType> {
    SignalType::DEFAULTS.to_vec()
}

/// Text export of figures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct ExportSettings {
    /// Width of an exported figure in character cells
    #[serde(default = "default_export_width")]
    pub width: u16,

    /// Height of an exported figure in character cells
    #[serde(default = "default_export_height")]
    pub height: u16,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            width: default_export_width(),
            height: default_export_height(),
        }
    }
}

fn default_export_width() -> u16 {
    120
}

fn default_export_height() -> u16 {
    40
}

/// Figure decoration toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct UiSettings {
    #[serde(default = "default_true")]
    pub legend: bool,

    #[serde(default = "default_true")]
    pub grid: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            legend: true,
            grid: true,
        }
    }
}

fn default_true() -> bool {
    true
}
