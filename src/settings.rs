// std imports
use std::collections::HashMap;
use std::include_str;
use std::path::Path;

// third-party imports
use clap::ValueEnum;
use config::{Config, File, FileFormat};
use serde::Deserialize;

// local imports
use crate::error::Error;

#[cfg(test)]
mod tests;

// ---

static DEFAULT_SETTINGS: &str = include_str!("../etc/defaults/config.toml");

// ---

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct Settings {
    pub paging: PagingMode,
    pub pager: PagerSettings,
    pub basic: BasicSettings,
}

impl Settings {
    /// Loads settings from `path` layered over the embedded defaults.
    ///
    /// A missing file is an error only if `required` is set.
    pub fn load(path: Option<&Path>, required: bool) -> Result<Self, Error> {
        let mut builder = Config::builder().add_source(File::from_str(DEFAULT_SETTINGS, FileFormat::Toml));
        if let Some(path) = path {
            log::debug!("loading configuration from {}", path.display());
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(required));
        }

        Ok(builder.build()?.try_deserialize()?)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Config::builder()
            .add_source(File::from_str(DEFAULT_SETTINGS, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }
}

// ---

/// When to page the output.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PagingMode {
    /// Page only if the output is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl PagingMode {
    /// Returns `true` if paging is enabled for an output that is or is not a terminal.
    pub fn enabled(self, is_terminal: bool) -> bool {
        match self {
            Self::Auto => is_terminal,
            Self::Always => true,
            Self::Never => false,
        }
    }
}

// ---

/// External pager settings.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct PagerSettings {
    /// Environment variables holding a pager command, in priority order.
    #[serde(default)]
    pub override_vars: Vec<String>,
    /// Whether to use the pager configured in git.
    #[serde(default)]
    pub vcs_lookup: bool,
    /// Pager commands to try when nothing else is configured.
    #[serde(default)]
    pub candidates: Vec<String>,
    /// Environment variables passed to the pager process.
    #[serde(default)]
    pub env: HashMap<String, String>,
}

// ---

/// Built-in pager settings.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct BasicSettings {
    /// Page break prompt template, `{page}` is replaced with the page number.
    pub prompt: Option<String>,
    pub width: Option<usize>,
    pub height: Option<usize>,
}
