// std imports
use std::io::{self, IsTerminal, Write, stderr};

// third-party imports
use config::ConfigError;
use owo_colors::OwoColorize;
use thiserror::Error;

// local imports
use crate::config::APP_NAME;


/// Error is an error which may occur in the application.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("failed to load configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("no appropriate pager executable found, install a pager like `less` or use the basic pager instead")]
    NoPagerFound,
    #[error("invalid arguments: {0}")]
    InvalidArgument(String),
    #[error(transparent)]
    Closed(#[from] PagerClosed),
    #[error("failed to start pager {command:?}: {source}")]
    StartFailed {
        command: String,
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// Returns `true` if the error means that paging was stopped early.
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed(_))
    }

    /// Prints the error to stderr.
    pub fn log(&self) {
        let colored = stderr().is_terminal();
        self.log_to(&mut stderr(), colored).ok();
    }

    /// Writes the error message to the given output, highlighting it if `colored` is set.
    pub fn log_to(&self, target: &mut impl Write, colored: bool) -> io::Result<()> {
        if colored {
            writeln!(target, "{}: {} {}", APP_NAME, "error:".bright_red().bold(), self)
        } else {
            writeln!(target, "{}: error: {}", APP_NAME, self)
        }
    }
}

/// PagerClosed is reported when the pager stops accepting text before all of it was shown.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PagerClosed {
    #[error("the pager was closed by the user")]
    Quit,
    #[error("the pager process (`{command}`) was closed")]
    Process { command: String },
}

/// Result is an alias for standard result with bound Error type.
pub type Result<T> = std::result::Result<T, Error>;
