// std imports
use std::num::NonZeroUsize;
use std::path::PathBuf;

// third-party imports
use clap::Parser;

// local imports
use crate::{
    paging::{Content, Options, stream},
    settings::{PagingMode, Settings},
};


// ---

/// Pages text in the terminal, using an external pager program when one is available.
#[derive(Parser, Debug)]
#[clap(version)]
pub struct Opt {
    /// Output paging options.
    #[arg(long, env = "PAGEWISE_PAGING", overrides_with = "paging")]
    #[arg(value_enum)]
    pub paging: Option<PagingMode>,

    /// Handful alias for --paging=never, overrides --paging option.
    #[arg(short = 'P')]
    pub paging_never: bool,

    /// Pager command to use instead of the configured ones, may be repeated.
    #[arg(long = "pager", env = "PAGEWISE_PAGER", value_name = "COMMAND")]
    pub pagers: Vec<String>,

    /// Use the built-in pager even if an external one is available.
    #[arg(long)]
    pub basic: bool,

    /// Page width for the built-in pager.
    #[arg(long, value_name = "COLUMNS")]
    pub width: Option<NonZeroUsize>,

    /// Page height for the built-in pager.
    #[arg(long, value_name = "LINES")]
    pub height: Option<NonZeroUsize>,

    /// Configuration file path.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Text to page instead of files.
    #[arg(long, conflicts_with = "files")]
    pub text: Option<String>,

    /// Files to page, standard input is used if none are given or `-` is given.
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,
}

impl Opt {
    /// Returns the effective paging mode.
    pub fn paging_mode(&self, settings: &Settings) -> PagingMode {
        if self.paging_never {
            PagingMode::Never
        } else {
            self.paging.unwrap_or(settings.paging)
        }
    }

    /// Builds pager options from the settings overridden by the command line.
    pub fn options(&self, settings: &Settings, enabled: bool) -> Options {
        let defaults = Options::from_settings(settings);
        Options {
            enabled,
            basic: self.basic,
            commands: self.pagers.clone(),
            width: self.width.map(NonZeroUsize::get).or(defaults.width),
            height: self.height.map(NonZeroUsize::get).or(defaults.height),
            ..defaults
        }
    }

    /// Returns `true` if the content is read from standard input.
    pub fn reads_stdin(&self) -> bool {
        self.text.is_none() && (self.files.is_empty() || self.files.iter().any(|f| f.as_os_str() == "-"))
    }

    /// Returns the content to page.
    pub fn content(&self) -> Content<'_> {
        if let Some(text) = &self.text {
            return Content::new().text(text.as_str());
        }
        if let [path] = self.files.as_slice() {
            if path.as_os_str() != "-" {
                return Content::new().path(path);
            }
        }

        Content::new().callback(move |pager| {
            if self.files.is_empty() {
                return stream(&mut std::io::stdin().lock(), pager);
            }
            for path in &self.files {
                if path.as_os_str() == "-" {
                    stream(&mut std::io::stdin().lock(), pager)?;
                } else {
                    let file = std::fs::File::open(path)?;
                    stream(&mut std::io::BufReader::new(file), pager)?;
                }
            }
            Ok(())
        })
    }
}
