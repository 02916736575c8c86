use std::collections::HashMap;
use std::fmt;
use std::io::{self, Write};
use std::process::{Child, ChildStdin, Command, ExitStatus, Stdio};

#[cfg(unix)]
use std::{
    io::{IsTerminal, stdin},
    os::unix::process::ExitStatusExt,
};

#[cfg(test)]
mod tests;

// ---

/// Characters that require the command line to be interpreted by a shell.
const SHELL_META: &[char] = &['|', '&', ';', '<', '>', '(', ')', '$', '`', '*', '?', '~', '\n'];

/// A parsed pager command line.
///
/// Plain command lines are split into a program and its arguments and executed directly.
/// Command lines containing shell syntax (redirections, pipes, substitutions) are passed
/// to the system shell as a whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PagerCommand {
    /// Program executed directly with the given arguments.
    Direct { program: String, args: Vec<String> },
    /// Command line executed by the system shell.
    Shell { line: String, program: String },
}

impl PagerCommand {
    /// Parses a command line.
    ///
    /// Returns an error of kind [`io::ErrorKind::InvalidInput`] for blank command lines.
    pub fn parse(value: &str) -> io::Result<Self> {
        let value = value.trim();
        if value.is_empty() {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, "empty pager command"));
        }

        let parts = match shellwords::split(value) {
            Ok(parts) if !parts.is_empty() => parts,
            Ok(_) => vec![value.to_owned()],
            Err(e) => {
                log::warn!("failed to parse pager command {value:?}: {e}, using raw value");
                value.split_whitespace().map(String::from).collect()
            }
        };

        if value.contains(SHELL_META) {
            return Ok(Self::Shell {
                line: value.to_owned(),
                program: parts[0].clone(),
            });
        }

        let mut parts = parts.into_iter();
        let program = parts.next().unwrap_or_else(|| value.to_owned());
        Ok(Self::Direct {
            program,
            args: parts.collect(),
        })
    }

    /// Returns the name of the program this command runs.
    pub fn program(&self) -> &str {
        match self {
            Self::Direct { program, .. } => program,
            Self::Shell { program, .. } => program,
        }
    }

    /// Returns the same program without any arguments.
    pub fn bare(&self) -> Self {
        Self::Direct {
            program: self.program().to_owned(),
            args: Vec::new(),
        }
    }

    fn build(&self, env: &HashMap<String, String>) -> Command {
        let mut command = match self {
            Self::Direct { program, args } => {
                let mut command = Command::new(program);
                command.args(args);
                command
            }
            Self::Shell { line, .. } => shell(line),
        };
        for (key, value) in env {
            command.env(key, value);
        }
        command
    }
}

impl fmt::Display for PagerCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct { program, args } => {
                let parts: Vec<&str> = std::iter::once(program.as_str())
                    .chain(args.iter().map(String::as_str))
                    .collect();
                f.write_str(&shellwords::join(&parts))
            }
            Self::Shell { line, .. } => f.write_str(line),
        }
    }
}

#[cfg(not(windows))]
fn shell(line: &str) -> Command {
    let mut command = Command::new("sh");
    command.arg("-c").arg(line);
    command
}

#[cfg(windows)]
fn shell(line: &str) -> Command {
    let mut command = Command::new("cmd");
    command.arg("/C").arg(line);
    command
}

// ---

/// Pager process configuration and builder.
pub struct Pager {
    command: PagerCommand,
    env: HashMap<String, String>,
}

impl Pager {
    /// Creates a pager configuration for the given command.
    pub fn new(command: PagerCommand) -> Self {
        Self {
            command,
            env: HashMap::new(),
        }
    }

    /// Sets an environment variable to pass to the pager process.
    pub fn with_env_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Sets multiple environment variables to pass to the pager process.
    pub fn with_env(mut self, vars: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>) -> Self {
        self.env.extend(vars.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Returns the configured command.
    pub fn command(&self) -> &PagerCommand {
        &self.command
    }

    /// Runs the command once with empty input and captured output.
    ///
    /// Returns `true` if the command could be started, exited successfully and printed nothing,
    /// which means it accepts the given arguments.
    pub fn probe(&self) -> bool {
        let output = self
            .command
            .build(&self.env)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output();

        match output {
            Ok(output) => {
                let ok = output.status.success() && output.stdout.is_empty() && output.stderr.is_empty();
                if !ok {
                    log::debug!(
                        "dry run of {} was not clean: {}, {} bytes of output",
                        self.command,
                        output.status,
                        output.stdout.len() + output.stderr.len()
                    );
                }
                ok
            }
            Err(e) => {
                log::debug!("dry run of {} failed: {e}", self.command);
                false
            }
        }
    }

    /// Starts the pager process with its standard input connected to a pipe.
    ///
    /// Standard output and standard error are inherited from the current process.
    pub fn start(self) -> io::Result<StartedPager> {
        let mut process = self.command.build(&self.env).stdin(Stdio::piped()).spawn()?;
        let stdin = process.stdin.take();
        log::debug!("started pager {} with pid {}", self.command, process.id());

        Ok(StartedPager {
            stdin,
            process: Some(process),
        })
    }
}

// ---

/// A running pager process.
///
/// Implements `Write` to pipe data into the pager's stdin.
/// On drop, closes stdin and waits for the process to exit.
pub struct StartedPager {
    stdin: Option<ChildStdin>,
    process: Option<Child>,
}

impl StartedPager {
    /// Returns the OS-assigned process identifier.
    pub fn id(&self) -> Option<u32> {
        self.process.as_ref().map(Child::id)
    }

    /// Closes the pager's input and waits for it to exit.
    ///
    /// Returns `Ok(None)` if the process was already reaped by someone else.
    pub fn finish(mut self) -> io::Result<Option<ExitStatus>> {
        // Close stdin first to signal EOF to the pager.
        self.stdin.take();

        let Some(mut process) = self.process.take() else {
            return Ok(None);
        };

        match process.wait() {
            Ok(status) => {
                recover(status);
                Ok(Some(status))
            }
            Err(e) if is_no_child(&e) => {
                log::debug!("pager process {} is already reaped", process.id());
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    fn stdin(&mut self) -> io::Result<&mut ChildStdin> {
        self.stdin.as_mut().ok_or_else(|| io::Error::from(io::ErrorKind::BrokenPipe))
    }
}

impl Drop for StartedPager {
    fn drop(&mut self) {
        self.stdin.take();

        if let Some(mut process) = self.process.take()
            && let Ok(status) = process.wait()
        {
            recover(status);
        }
    }
}

impl Write for StartedPager {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.stdin()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.stdin()?.flush()
    }
}

// ---

/// Returns `true` if the error means the reading end of the pipe is gone.
pub fn is_broken_pipe(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::BrokenPipe
}

#[cfg(unix)]
fn is_no_child(err: &io::Error) -> bool {
    err.raw_os_error() == Some(libc::ECHILD)
}

#[cfg(not(unix))]
fn is_no_child(_: &io::Error) -> bool {
    false
}

// ---

#[cfg(unix)]
fn recover(status: ExitStatus) {
    if let Some(signal) = status.signal() {
        log::debug!("pager terminated by signal {signal}");
        if signal == libc::SIGKILL && stdin().is_terminal() {
            Command::new("stty").arg("echo").status().ok();
        }
    }
}

#[cfg(not(unix))]
fn recover(_: ExitStatus) {}
