//! Pager executable resolution.
//!
//! Candidate commands come from environment variables, the pager configured for git,
//! and a list of well-known pager programs. The first candidate whose program is found
//! in `PATH` is used.

// std imports
use std::collections::HashSet;
use std::env;
use std::process::{Command, Stdio};

// third-party imports
use pager::PagerCommand;

// local imports
use crate::settings::PagerSettings;

// ---

/// Trait for providing environment variable access.
/// Allows dependency injection for testing.
pub trait EnvProvider {
    /// Gets an environment variable value.
    fn get(&self, name: &str) -> Option<String>;
}

/// Default environment provider that reads from the actual environment.
pub struct SystemEnv;

impl EnvProvider for SystemEnv {
    fn get(&self, name: &str) -> Option<String> {
        env::var(name).ok()
    }
}

// ---

/// Trait for checking executable availability.
/// Allows dependency injection for testing.
pub trait ExeChecker {
    /// Checks if an executable is available in PATH.
    fn is_available(&self, executable: &str) -> bool;
}

/// Default executable checker that uses the `which` crate.
pub struct SystemExeChecker;

impl ExeChecker for SystemExeChecker {
    fn is_available(&self, executable: &str) -> bool {
        is_available(executable)
    }
}

// ---

/// Trait for looking up the pager configured for a version control system.
pub trait VcsPagerLookup {
    fn pager(&self) -> Option<String>;
}

/// Reads `core.pager` from git configuration.
pub struct GitConfig;

impl VcsPagerLookup for GitConfig {
    fn pager(&self) -> Option<String> {
        if !is_available("git") {
            return None;
        }

        let output = Command::new("git")
            .args(["config", "--get-all", "core.pager"])
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .inspect_err(|e| log::debug!("failed to query git pager: {e}"))
            .ok()?;
        if !output.status.success() {
            return None;
        }

        String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(String::from)
    }
}

// ---

/// Where pager candidates are taken from, in priority order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sources {
    /// Environment variables that may hold a pager command.
    pub override_vars: Vec<String>,
    /// Whether to ask the version control system for its configured pager.
    pub vcs_lookup: bool,
    /// Well-known pager commands to try last.
    pub fallback: Vec<String>,
}

impl From<&PagerSettings> for Sources {
    fn from(settings: &PagerSettings) -> Self {
        Self {
            override_vars: settings.override_vars.clone(),
            vcs_lookup: settings.vcs_lookup,
            fallback: settings.candidates.clone(),
        }
    }
}

// ---

/// Finds the pager command to use.
pub struct Resolver<E = SystemEnv, C = SystemExeChecker, V = GitConfig> {
    sources: Sources,
    env: E,
    exe_checker: C,
    vcs: V,
}

impl Resolver<SystemEnv, SystemExeChecker, GitConfig> {
    /// Creates a resolver that uses the actual environment.
    pub fn new(sources: Sources) -> Self {
        Self::with_providers(sources, SystemEnv, SystemExeChecker, GitConfig)
    }
}

impl<E: EnvProvider, C: ExeChecker, V: VcsPagerLookup> Resolver<E, C, V> {
    /// Creates a resolver with custom providers.
    pub fn with_providers(sources: Sources, env: E, exe_checker: C, vcs: V) -> Self {
        Self {
            sources,
            env,
            exe_checker,
            vcs,
        }
    }

    /// Returns the built-in candidates in priority order.
    ///
    /// The version control system is queried only when the iterator gets that far.
    pub fn candidates(&self) -> impl Iterator<Item = String> + '_ {
        let vars = self.sources.override_vars.iter().filter_map(|name| {
            let value = self.env.get(name);
            if let Some(value) = &value {
                log::debug!("candidate from {name}: {value:?}");
            }
            value
        });
        let vcs = std::iter::once_with(|| self.sources.vcs_lookup.then(|| self.vcs.pager()).flatten()).flatten();
        let fallback = self.sources.fallback.iter().cloned();

        vars.chain(vcs).chain(fallback)
    }

    /// Finds the first available command.
    ///
    /// If `explicit` is not empty, only those commands are considered.
    pub fn find(&self, explicit: &[String]) -> Option<String> {
        let result = if explicit.is_empty() {
            find_executable(self.candidates(), &self.exe_checker)
        } else {
            find_executable(explicit.iter().cloned(), &self.exe_checker)
        };
        match &result {
            Some(command) => log::debug!("resolved pager command: {command:?}"),
            None => log::debug!("no pager command resolved"),
        }
        result
    }
}

// ---

/// Returns the first candidate whose program is available.
///
/// Candidates are trimmed, blank ones are skipped and repeated ones are checked once.
pub fn find_executable<I, S>(candidates: I, exe_checker: &impl ExeChecker) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .map(|candidate| candidate.as_ref().trim().to_owned())
        .filter(|candidate| !candidate.is_empty())
        .filter(|candidate| seen.insert(candidate.clone()))
        .find(|candidate| match PagerCommand::parse(candidate) {
            Ok(command) => {
                let available = exe_checker.is_available(command.program());
                if !available {
                    log::debug!("candidate {candidate:?}: {:?} not found in PATH", command.program());
                }
                available
            }
            Err(e) => {
                log::debug!("candidate {candidate:?} skipped: {e}");
                false
            }
        })
}

/// Checks if an executable is available in PATH.
pub fn is_available(executable: &str) -> bool {
    which::which(executable).is_ok()
}
