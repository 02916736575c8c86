//! Text paging strategies.
//!
//! Three strategies share the [`Pager`] interface:
//! - [`BasicPager`] reflows text to the terminal size and prompts between pages by itself,
//! - [`SystemPager`] streams text into an external pager program such as `less`,
//! - [`NullPager`] passes text through when paging is disabled.
//!
//! [`Options`] selects and builds one of them as an [`AnyPager`].

mod basic;
mod null;
mod resolve;
mod selection;
mod system;


pub use basic::{BasicPager, DEFAULT_PROMPT, PageCursor, Prompt};
pub use null::NullPager;
pub use resolve::{
    EnvProvider, ExeChecker, GitConfig, Resolver, Sources, SystemEnv, SystemExeChecker, VcsPagerLookup,
    find_executable, is_available,
};
pub use selection::{AnyPager, Content, Options, Strategy, page, stream};
pub use system::SystemPager;

// local imports
use crate::error::{Error, Result};

// ---

/// Common interface of all paging strategies.
pub trait Pager {
    /// Sends text to the pager.
    ///
    /// Fails with [`Error::Closed`] if the pager does not accept any more text,
    /// either because the user asked to quit or because the pager process exited.
    fn write(&mut self, text: &str) -> Result<()>;

    /// Sends text followed by a line terminator, unless it already ends with one.
    fn write_line(&mut self, text: &str) -> Result<()> {
        if text.ends_with('\n') {
            self.write(text)
        } else {
            self.write(&format!("{text}\n"))
        }
    }

    /// Same as [`Pager::write`] but reports a closed pager as `Ok(false)`.
    fn try_write(&mut self, text: &str) -> Result<bool> {
        match self.write(text) {
            Ok(()) => Ok(true),
            Err(Error::Closed(e)) => {
                log::debug!("{e}");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Finishes paging.
    ///
    /// Returns `true` if the pager completed successfully.
    /// Calling it again without writing anything in between returns the same value.
    fn close(&mut self) -> bool;

    /// Writes the whole text and closes the pager.
    ///
    /// Stopping early because the pager was closed is not an error.
    fn page(&mut self, text: &str) -> Result<bool> {
        let result = self.write(text);
        conclude(result, self.close())
    }
}

/// Combines the outcome of writing with the status of closing the pager.
fn conclude(result: Result<()>, status: bool) -> Result<bool> {
    match result {
        Ok(()) => Ok(status),
        Err(Error::Closed(e)) => {
            log::debug!("paging stopped early: {e}");
            Ok(status)
        }
        Err(e) => Err(e),
    }
}
