// std imports
use std::io::{IsTerminal, Stdout, Write, stdout};

// local imports
use super::Pager;
use crate::error::Result;

// ---

/// Pager used when paging is disabled.
///
/// Text goes straight to an interactive output. For a non-interactive output nothing is
/// written and the text is handed back to the caller by [`NullPager::passthrough`].
#[derive(Debug)]
pub struct NullPager<W> {
    output: W,
    interactive: bool,
}

impl<W: Write> NullPager<W> {
    pub fn new(output: W, interactive: bool) -> Self {
        Self { output, interactive }
    }

    /// Writes text to an interactive output, or returns it unmodified otherwise.
    pub fn passthrough<'t>(&mut self, text: &'t str) -> Result<Option<&'t str>> {
        if !self.interactive {
            return Ok(Some(text));
        }
        self.output.write_all(text.as_bytes())?;
        Ok(None)
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl NullPager<Stdout> {
    /// Creates a pager for standard output, interactive if it is a terminal.
    pub fn stdout() -> Self {
        let output = stdout();
        let interactive = output.is_terminal();
        Self::new(output, interactive)
    }
}

impl<W: Write> Pager for NullPager<W> {
    fn write(&mut self, text: &str) -> Result<()> {
        self.passthrough(text).map(|_| ())
    }

    fn close(&mut self) -> bool {
        if let Err(e) = self.output.flush() {
            log::debug!("failed to flush output: {e}");
        }
        true
    }
}
