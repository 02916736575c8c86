// std imports
use std::collections::HashMap;
use std::fmt;
use std::io::Write;

// third-party imports
use pager::{Pager as Process, PagerCommand, StartedPager, is_broken_pipe};

// local imports
use super::Pager;
use super::resolve::{EnvProvider, ExeChecker, Resolver, VcsPagerLookup};
use crate::error::{Error, PagerClosed, Result};

// ---

enum State {
    /// No process is running, it is started on the next write.
    Idle,
    Running(StartedPager),
    /// The process exited before it received all the text.
    Terminated,
}

/// Pager that streams text into an external pager program.
///
/// The program is started on the first write and receives text through its standard input.
/// Its standard output is the terminal of the current process.
pub struct SystemPager {
    command: String,
    env: HashMap<String, String>,
    state: State,
    status: bool,
}

impl SystemPager {
    /// Creates a pager running the given, already resolved, command.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            env: HashMap::new(),
            state: State::Idle,
            status: true,
        }
    }

    /// Creates a pager running the first available command.
    ///
    /// Fails with [`Error::NoPagerFound`] if none of the candidates is available.
    pub fn resolve<E, C, V>(resolver: &Resolver<E, C, V>, explicit: &[String]) -> Result<Self>
    where
        E: EnvProvider,
        C: ExeChecker,
        V: VcsPagerLookup,
    {
        resolver.find(explicit).map(Self::new).ok_or(Error::NoPagerFound)
    }

    /// Sets environment variables to pass to the pager process.
    pub fn with_env(mut self, vars: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>) -> Self {
        self.env.extend(vars.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Returns the resolved command.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Resolves the command again from a new list of candidates.
    ///
    /// Keeps the current command if none of them is available.
    /// A running pager process is not affected until it is closed.
    pub fn reconsider<E, C, V>(&mut self, resolver: &Resolver<E, C, V>, candidates: &[String]) -> Result<&str>
    where
        E: EnvProvider,
        C: ExeChecker,
        V: VcsPagerLookup,
    {
        self.command = resolver.find(candidates).ok_or(Error::NoPagerFound)?;
        Ok(&self.command)
    }

    /// Returns the process identifier of the running pager, if any.
    pub fn id(&self) -> Option<u32> {
        match &self.state {
            State::Running(pager) => pager.id(),
            _ => None,
        }
    }

    fn running(&mut self) -> Result<&mut StartedPager> {
        if matches!(self.state, State::Idle) {
            self.state = State::Running(self.spawn()?);
        }
        match &mut self.state {
            State::Running(pager) => Ok(pager),
            _ => Err(closed(&self.command)),
        }
    }

    fn spawn(&self) -> Result<StartedPager> {
        let start_failed = |source| Error::StartFailed {
            command: self.command.clone(),
            source,
        };

        let mut command = PagerCommand::parse(&self.command).map_err(start_failed)?;
        if !Process::new(command.clone()).with_env(&self.env).probe() {
            log::debug!("pager {} failed a dry run, falling back to {}", command, command.program());
            command = command.bare();
        }

        Process::new(command).with_env(&self.env).start().map_err(start_failed)
    }

    fn terminate(&mut self) {
        if let State::Running(pager) = std::mem::replace(&mut self.state, State::Terminated) {
            self.status = finish(pager);
        }
    }
}

impl fmt::Debug for SystemPager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self.state {
            State::Idle => "idle",
            State::Running(_) => "running",
            State::Terminated => "terminated",
        };
        f.debug_struct("SystemPager")
            .field("command", &self.command)
            .field("state", &state)
            .field("pid", &self.id())
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

impl Pager for SystemPager {
    fn write(&mut self, text: &str) -> Result<()> {
        let pager = self.running()?;
        match pager.write_all(text.as_bytes()) {
            Ok(()) => Ok(()),
            Err(e) if is_broken_pipe(&e) => {
                log::debug!("pager {:?} closed its input", self.command);
                self.terminate();
                Err(closed(&self.command))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn close(&mut self) -> bool {
        if let State::Running(pager) = std::mem::replace(&mut self.state, State::Idle) {
            self.status = finish(pager);
        }
        self.status
    }
}

fn closed(command: &str) -> Error {
    PagerClosed::Process {
        command: command.to_owned(),
    }
    .into()
}

fn finish(pager: StartedPager) -> bool {
    match pager.finish() {
        Ok(Some(status)) => {
            log::debug!("pager exited with {status}");
            status.success()
        }
        Ok(None) => true,
        Err(e) => {
            log::warn!("failed to wait for pager process: {e}");
            false
        }
    }
}
