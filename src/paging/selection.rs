//! Pager strategy selection and the top-level paging operation.

// std imports
use std::borrow::Cow;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, IsTerminal, Write, stdin, stdout};
use std::path::{Path, PathBuf};

// local imports
use super::resolve::{EnvProvider, ExeChecker, Resolver, Sources, VcsPagerLookup};
use super::{BasicPager, NullPager, Pager, Prompt, SystemPager, conclude};
use crate::console::Viewport;
use crate::error::{Error, Result};
use crate::settings::Settings;

// ---

/// Paging strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    /// Paging is disabled, text is passed through.
    Null,
    /// Built-in pager.
    Basic,
    /// External pager running the resolved command.
    System(String),
}

impl Strategy {
    /// Selects a strategy based on whether paging is enabled and which pager command was resolved.
    pub fn select(enabled: bool, resolved: Option<String>) -> Self {
        match (enabled, resolved) {
            (false, _) => Self::Null,
            (true, Some(command)) => Self::System(command),
            (true, None) => Self::Basic,
        }
    }
}

// ---

/// One of the available pagers.
#[derive(Debug)]
pub enum AnyPager<W, R> {
    Null(NullPager<W>),
    Basic(BasicPager<W, R>),
    System(SystemPager),
}

impl<W, R> AnyPager<W, R> {
    pub fn strategy(&self) -> Strategy {
        match self {
            Self::Null(_) => Strategy::Null,
            Self::Basic(_) => Strategy::Basic,
            Self::System(pager) => Strategy::System(pager.command().to_owned()),
        }
    }
}

impl<W: Write, R: BufRead> Pager for AnyPager<W, R> {
    fn write(&mut self, text: &str) -> Result<()> {
        match self {
            Self::Null(pager) => pager.write(text),
            Self::Basic(pager) => pager.write(text),
            Self::System(pager) => pager.write(text),
        }
    }

    fn close(&mut self) -> bool {
        match self {
            Self::Null(pager) => pager.close(),
            Self::Basic(pager) => pager.close(),
            Self::System(pager) => pager.close(),
        }
    }
}

// ---

/// Pager options.
pub struct Options {
    /// Whether paging is enabled at all.
    pub enabled: bool,
    /// Use the built-in pager even if an external one is available.
    pub basic: bool,
    /// Explicit pager commands, replacing the configured candidates.
    pub commands: Vec<String>,
    /// Sources of pager candidates.
    pub sources: Sources,
    /// Environment variables for the external pager.
    pub env: HashMap<String, String>,
    /// Page width for the built-in pager, the terminal width is used if not set.
    pub width: Option<usize>,
    /// Page height for the built-in pager, the terminal height is used if not set.
    pub height: Option<usize>,
    /// Page break prompt of the built-in pager.
    pub prompt: Prompt,
}

impl Options {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            enabled: true,
            basic: false,
            commands: Vec::new(),
            sources: Sources::from(&settings.pager),
            env: settings.pager.env.clone(),
            width: settings.basic.width,
            height: settings.basic.height,
            prompt: settings.basic.prompt.clone().map(Prompt::template).unwrap_or_default(),
        }
    }

    /// Decides which strategy to use.
    pub fn strategy<E, C, V>(&self, resolver: &Resolver<E, C, V>) -> Strategy
    where
        E: EnvProvider,
        C: ExeChecker,
        V: VcsPagerLookup,
    {
        let resolved = match self.enabled && !self.basic {
            true => resolver.find(&self.commands),
            false => None,
        };
        Strategy::select(self.enabled, resolved)
    }

    /// Builds the pager using the actual environment to find an external pager.
    ///
    /// `interactive` tells whether `output` is a terminal.
    pub fn build<W: Write, R: BufRead>(self, output: W, input: R, interactive: bool) -> AnyPager<W, R> {
        let resolver = Resolver::new(self.sources.clone());
        self.build_with(&resolver, output, input, interactive)
    }

    /// Builds the pager using the given resolver to find an external pager.
    pub fn build_with<W, R, E, C, V>(
        self,
        resolver: &Resolver<E, C, V>,
        output: W,
        input: R,
        interactive: bool,
    ) -> AnyPager<W, R>
    where
        W: Write,
        R: BufRead,
        E: EnvProvider,
        C: ExeChecker,
        V: VcsPagerLookup,
    {
        let strategy = self.strategy(resolver);
        log::debug!("selected paging strategy: {strategy:?}");

        match strategy {
            Strategy::Null => AnyPager::Null(NullPager::new(output, interactive)),
            Strategy::Basic => {
                let viewport = match (self.width, self.height) {
                    (Some(width), Some(height)) => Viewport::new(width, height),
                    _ => Viewport::detect().with_overrides(self.width, self.height),
                };
                AnyPager::Basic(BasicPager::with_prompt(output, input, viewport, self.prompt))
            }
            Strategy::System(command) => AnyPager::System(SystemPager::new(command).with_env(self.env)),
        }
    }

    /// Pages the content to standard output, reading answers to prompts from standard input.
    pub fn page(self, content: Content<'_>) -> Result<bool> {
        let output = stdout();
        let interactive = output.is_terminal();
        let mut pager = self.build(output.lock(), stdin().lock(), interactive);
        page(&mut pager, content)
    }
}

// ---

type Callback<'a> = Box<dyn FnOnce(&mut dyn Pager) -> Result<()> + 'a>;

/// Content to page.
///
/// Exactly one of text, path or callback must be set.
#[derive(Default)]
pub struct Content<'a> {
    text: Option<Cow<'a, str>>,
    path: Option<PathBuf>,
    callback: Option<Callback<'a>>,
}

impl<'a> Content<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pages the given text.
    pub fn text(mut self, text: impl Into<Cow<'a, str>>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Pages the contents of a file, line by line.
    ///
    /// Invalid UTF-8 sequences in the file are replaced with U+FFFD.
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Calls a function that writes to the pager.
    pub fn callback(mut self, callback: impl FnOnce(&mut dyn Pager) -> Result<()> + 'a) -> Self {
        self.callback = Some(Box::new(callback));
        self
    }

    fn into_source(self) -> Result<Source<'a>> {
        match (self.text, self.path, self.callback) {
            (Some(text), None, None) => Ok(Source::Text(text)),
            (None, Some(path), None) => Ok(Source::Path(path)),
            (None, None, Some(callback)) => Ok(Source::Callback(callback)),
            (None, None, None) => Err(Error::InvalidArgument(
                "nothing to page, expected text, a path or a callback".into(),
            )),
            _ => Err(Error::InvalidArgument(
                "text, path and callback are mutually exclusive".into(),
            )),
        }
    }
}

enum Source<'a> {
    Text(Cow<'a, str>),
    Path(PathBuf),
    Callback(Callback<'a>),
}

/// Pages the content and closes the pager.
///
/// Returns the result of closing the pager.
/// Stopping early because the pager was closed is not an error.
/// Invalid content is rejected before anything is written.
pub fn page<P: Pager>(pager: &mut P, content: Content<'_>) -> Result<bool> {
    let source = content.into_source()?;
    let result = match source {
        Source::Text(text) => pager.write(&text),
        Source::Path(path) => stream_file(&path, pager),
        Source::Callback(callback) => callback(pager),
    };
    conclude(result, pager.close())
}

/// Writes everything from the reader to the pager, line by line.
///
/// Pagers accept text only, so invalid UTF-8 sequences are replaced with U+FFFD.
pub fn stream(reader: &mut impl BufRead, pager: &mut (impl Pager + ?Sized)) -> Result<()> {
    let mut buf = Vec::new();
    while reader.read_until(b'\n', &mut buf)? != 0 {
        pager.write(&String::from_utf8_lossy(&buf))?;
        buf.clear();
    }
    Ok(())
}

fn stream_file(path: &Path, pager: &mut impl Pager) -> Result<()> {
    let mut reader = BufReader::new(File::open(path)?);
    stream(&mut reader, pager)
}
