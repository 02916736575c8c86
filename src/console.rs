// std imports
use std::io::{self, BufRead, BufReader, stdin};

// third-party imports
use terminal_size::{Height, Width, terminal_size};

// local imports
use crate::paging::{EnvProvider, SystemEnv};

// ---

pub const DEFAULT_WIDTH: usize = 80;
pub const DEFAULT_HEIGHT: usize = 24;

/// Size of the visible area of the terminal, in columns and lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: usize,
    pub height: usize,
}

impl Viewport {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Detects the size of the terminal attached to the process.
    ///
    /// `COLUMNS` and `LINES` environment variables take priority over the detected size.
    /// Falls back to 80x24 if nothing is known.
    pub fn detect() -> Self {
        let detected = terminal_size().map(|(Width(w), Height(h))| (w as usize, h as usize));
        Self::resolve(&SystemEnv, detected)
    }

    /// Replaces dimensions with explicitly configured ones.
    pub fn with_overrides(self, width: Option<usize>, height: Option<usize>) -> Self {
        Self {
            width: width.unwrap_or(self.width),
            height: height.unwrap_or(self.height),
        }
    }

    fn resolve(env: &impl EnvProvider, detected: Option<(usize, usize)>) -> Self {
        let var = |name: &str| {
            env.get(name)
                .and_then(|v| v.trim().parse::<usize>().ok())
                .filter(|&v| v != 0)
        };
        let (width, height) = detected.unwrap_or((DEFAULT_WIDTH, DEFAULT_HEIGHT));
        let viewport = Self {
            width: var("COLUMNS").unwrap_or(width),
            height: var("LINES").unwrap_or(height),
        };
        log::debug!("terminal viewport is {}x{}", viewport.width, viewport.height);
        viewport
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

// ---

/// Opens the source of answers to page prompts.
///
/// When the text itself is read from standard input, answers are read from the controlling terminal.
pub fn prompt_input(content_from_stdin: bool) -> io::Result<Box<dyn BufRead>> {
    if content_from_stdin {
        return controlling_terminal();
    }
    Ok(Box::new(stdin().lock()))
}

#[cfg(unix)]
fn controlling_terminal() -> io::Result<Box<dyn BufRead>> {
    let tty = std::fs::File::open("/dev/tty")?;
    Ok(Box::new(BufReader::new(tty)))
}

#[cfg(windows)]
fn controlling_terminal() -> io::Result<Box<dyn BufRead>> {
    let tty = std::fs::File::open("CONIN$")?;
    Ok(Box::new(BufReader::new(tty)))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    struct MockEnv(HashMap<&'static str, &'static str>);

    impl EnvProvider for MockEnv {
        fn get(&self, name: &str) -> Option<String> {
            self.0.get(name).map(|v| v.to_string())
        }
    }

    #[test]
    fn test_viewport_defaults_without_terminal() {
        let viewport = Viewport::resolve(&MockEnv(HashMap::new()), None);
        assert_eq!(viewport, Viewport::new(80, 24));
    }

    #[test]
    fn test_viewport_uses_detected_size() {
        let viewport = Viewport::resolve(&MockEnv(HashMap::new()), Some((120, 40)));
        assert_eq!(viewport, Viewport::new(120, 40));
    }

    #[test]
    fn test_viewport_env_overrides() {
        let env = MockEnv(HashMap::from([("COLUMNS", "100"), ("LINES", " 50 ")]));
        let viewport = Viewport::resolve(&env, Some((120, 40)));
        assert_eq!(viewport, Viewport::new(100, 50));
    }

    #[test]
    fn test_viewport_ignores_invalid_env() {
        let env = MockEnv(HashMap::from([("COLUMNS", "wide"), ("LINES", "0")]));
        let viewport = Viewport::resolve(&env, None);
        assert_eq!(viewport, Viewport::new(80, 24));
    }

    #[test]
    fn test_viewport_with_overrides() {
        let viewport = Viewport::new(80, 24).with_overrides(Some(40), None);
        assert_eq!(viewport, Viewport::new(40, 24));
    }
}
