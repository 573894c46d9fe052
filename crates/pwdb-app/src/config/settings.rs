//! Settings parser for .pwdb/config.toml

use super::types::Settings;
use pwdb_core::prelude::*;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.toml";
const PWDB_DIR: &str = ".pwdb";

/// Location of the settings file below `base_dir`
pub fn config_path(base_dir: &Path) -> PathBuf {
    base_dir.join(PWDB_DIR).join(CONFIG_FILENAME)
}

/// Load settings from `<base_dir>/.pwdb/config.toml`
///
/// A missing file yields the defaults; a file that cannot be read or
/// parsed is reported with a warning and the defaults are used.
pub fn load_settings(base_dir: &Path) -> Settings {
    let config_path = config_path(base_dir);

    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    match std::fs::read_to_string(&config_path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", config_path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", config_path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            Settings::default()
        }
    }
}
