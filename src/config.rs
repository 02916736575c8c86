// std imports
use std::env;
use std::path::{Path, PathBuf};

// third-party imports
use once_cell::sync::Lazy;

// local imports
use crate::error::Result;
use crate::settings::Settings;

// ---

pub const APP_NAME: &str = "pagewise";
pub const CONFIG_ENV: &str = "PAGEWISE_CONFIG";

static DEFAULT: Lazy<Settings> = Lazy::new(Settings::default);

/// Returns the embedded default settings.
pub fn default() -> &'static Settings {
    &DEFAULT
}

/// Returns the path of the user configuration file.
///
/// `PAGEWISE_CONFIG` overrides the location in the platform configuration directory.
pub fn path() -> Option<PathBuf> {
    env::var_os(CONFIG_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| dirs::config_dir().map(|dir| dir.join(APP_NAME).join("config.toml")))
}

/// Loads settings from an explicitly given file, or from the user configuration file if it exists.
pub fn load(explicit: Option<&Path>) -> Result<Settings> {
    match explicit {
        Some(path) => Settings::load(Some(path), true),
        None => Settings::load(path().as_deref(), false),
    }
}
