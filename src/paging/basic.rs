// std imports
use std::collections::VecDeque;
use std::fmt;
use std::io::{BufRead, Write};

// local imports
use super::Pager;
use crate::console::Viewport;
use crate::error::{Error, PagerClosed, Result};
use crate::wrap;

// ---

/// Default page break prompt, `{page}` is replaced with the current page number.
pub const DEFAULT_PROMPT: &str = "\n--- Page -{page}- Press enter/return to continue (or q to quit) ---";

/// Page number used to measure the height of the prompt.
const PROMPT_MEASURE_PAGE: usize = 100;

/// Renders the text shown at each page break.
pub struct Prompt(Box<dyn Fn(usize) -> String>);

impl Prompt {
    /// Creates a prompt from a function of the page number.
    pub fn new(render: impl Fn(usize) -> String + 'static) -> Self {
        Self(Box::new(render))
    }

    /// Creates a prompt from a template where `{page}` is replaced with the page number.
    pub fn template(template: impl Into<String>) -> Self {
        let template = template.into();
        Self::new(move |page| template.replace("{page}", &page.to_string()))
    }

    pub fn render(&self, page: usize) -> String {
        (self.0)(page)
    }
}

impl Default for Prompt {
    fn default() -> Self {
        Self::template(DEFAULT_PROMPT)
    }
}

impl fmt::Debug for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Prompt").field(&self.render(1)).finish()
    }
}

// ---

/// Position within the paged output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    page: usize,
    lines_left: usize,
    height: usize,
}

impl PageCursor {
    pub fn new(height: usize) -> Self {
        let height = height.max(1);
        Self {
            page: 1,
            lines_left: height,
            height,
        }
    }

    /// Current page number, starting from 1.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Lines that still fit on the current page.
    pub fn lines_left(&self) -> usize {
        self.lines_left
    }

    /// Lines per page.
    pub fn height(&self) -> usize {
        self.height
    }

    fn is_full(&self) -> bool {
        self.lines_left == 0
    }

    /// Reserves up to `wanted` lines on the current page and returns how many were reserved.
    fn take(&mut self, wanted: usize) -> usize {
        let n = wanted.min(self.lines_left);
        self.lines_left -= n;
        n
    }

    fn next_page(&mut self) {
        self.page += 1;
        self.lines_left = self.height;
    }

    fn reset(&mut self) {
        *self = Self::new(self.height);
    }
}

// ---

/// Pager that reflows text to the terminal size and asks the user to continue after each page.
///
/// Answers are read line by line from `input`. An answer starting with `q` or `Q` stops paging,
/// and every following write fails with [`PagerClosed::Quit`] until the pager is closed.
///
/// Text after the last line terminator is held until the rest of its line is written
/// or the pager is closed.
#[derive(Debug)]
pub struct BasicPager<W, R> {
    output: W,
    input: R,
    width: usize,
    prompt: Prompt,
    cursor: PageCursor,
    leftover: VecDeque<String>,
    partial: String,
    quit: bool,
}

impl<W: Write, R: BufRead> BasicPager<W, R> {
    pub fn new(output: W, input: R, viewport: Viewport) -> Self {
        Self::with_prompt(output, input, viewport, Prompt::default())
    }

    /// Creates a pager with a custom prompt.
    ///
    /// The page height is reduced by the number of lines the prompt occupies.
    pub fn with_prompt(output: W, input: R, viewport: Viewport, prompt: Prompt) -> Self {
        let width = viewport.width.max(1);
        let prompt_height = wrap::line_count(&prompt.render(PROMPT_MEASURE_PAGE), width);
        let height = viewport.height.saturating_sub(prompt_height);
        log::debug!("basic pager: {width} columns, {height} lines per page, prompt takes {prompt_height} lines");

        Self {
            output,
            input,
            width,
            prompt,
            cursor: PageCursor::new(height),
            leftover: VecDeque::new(),
            partial: String::new(),
            quit: false,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of text lines per page.
    pub fn height(&self) -> usize {
        self.cursor.height()
    }

    pub fn cursor(&self) -> &PageCursor {
        &self.cursor
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn send_line(&mut self, line: &str) -> Result<()> {
        self.leftover.extend(wrap::reflow_line(line, self.width));

        while !self.leftover.is_empty() {
            if self.cursor.is_full() {
                self.page_break()?;
            }
            let n = self.cursor.take(self.leftover.len());
            let chunk: String = self.leftover.drain(..n).collect();
            self.output.write_all(chunk.as_bytes())?;
        }

        Ok(())
    }

    fn page_break(&mut self) -> Result<()> {
        let page = self.cursor.page();
        let mut prompt = wrap::reflow(&self.prompt.render(page), self.width);
        if !prompt.ends_with('\n') {
            prompt.push('\n');
        }
        self.output.write_all(prompt.as_bytes())?;
        self.output.flush()?;

        let mut answer = String::new();
        self.input.read_line(&mut answer)?;
        if wants_quit(&answer) {
            log::debug!("quit requested at page {page}");
            self.leftover.clear();
            self.quit = true;
            return Err(PagerClosed::Quit.into());
        }

        self.cursor.next_page();
        Ok(())
    }
}

impl<W: Write, R: BufRead> Pager for BasicPager<W, R> {
    fn write(&mut self, text: &str) -> Result<()> {
        if self.quit {
            return Err(PagerClosed::Quit.into());
        }

        let mut pending = std::mem::take(&mut self.partial);
        pending.push_str(text);

        let mut rest = pending.as_str();
        while let Some(end) = rest.find('\n') {
            let (line, tail) = rest.split_at(end + 1);
            self.send_line(line)?;
            rest = tail;
        }
        self.partial = rest.to_owned();

        Ok(())
    }

    fn close(&mut self) -> bool {
        let mut status = true;
        let partial = std::mem::take(&mut self.partial);
        if !self.quit && !partial.is_empty() {
            match self.send_line(&partial) {
                Ok(()) | Err(Error::Closed(_)) => {}
                Err(e) => {
                    log::warn!("failed to write paged output: {e}");
                    status = false;
                }
            }
        }

        self.leftover.clear();
        self.quit = false;
        self.cursor.reset();
        match self.output.flush() {
            Ok(()) => status,
            Err(e) => {
                log::warn!("failed to flush paged output: {e}");
                false
            }
        }
    }
}

fn wants_quit(answer: &str) -> bool {
    answer
        .trim_start()
        .chars()
        .next()
        .is_some_and(|c| c.eq_ignore_ascii_case(&'q'))
}
