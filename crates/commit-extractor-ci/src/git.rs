//! Git command definitions.

use std::path::{Path, PathBuf};

use crate::runner::CommandSpec;

/// Per-path bound for `git config --global --add safe.directory`.
pub const TRUST_TIMEOUT_SECS: u64 = 5;

/// Git invocations used by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitCommand {
    /// git config --global --add safe.directory <path>
    TrustDirectory(PathBuf),

    /// git log -<limit> [--pretty=%B]
    Log { limit: u32, pretty: bool },
}

impl GitCommand {
    /// Get the command name as a string.
    pub fn name(&self) -> &'static str {
        match self {
            GitCommand::TrustDirectory(_) => "git config safe.directory",
            GitCommand::Log { .. } => "git log",
        }
    }

    /// Arguments passed to the git executable.
    pub fn args(&self) -> Vec<String> {
        match self {
            GitCommand::TrustDirectory(path) => vec![
                "config".to_string(),
                "--global".to_string(),
                "--add".to_string(),
                "safe.directory".to_string(),
                path.to_string_lossy().into_owned(),
            ],
            GitCommand::Log { limit, pretty } => {
                let mut args = vec!["log".to_string(), format!("-{limit}")];
                if *pretty {
                    args.push("--pretty=%B".to_string());
                }
                args
            }
        }
    }
}

/// How git is launched: executable plus extra environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitCli {
    /// Executable name or path.
    pub program: String,

    /// Extra environment variables for every git call.
    pub envs: Vec<(String, String)>,
}

impl Default for GitCli {
    fn default() -> Self {
        Self {
            program: "git".to_string(),
            envs: Vec::new(),
        }
    }
}

impl GitCli {
    /// Use a specific git executable.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            envs: Vec::new(),
        }
    }

    /// Add an environment variable (e.g. `GIT_CONFIG_GLOBAL`).
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    /// Build a runnable spec for `command`.
    pub fn spec(&self, command: &GitCommand, timeout_secs: u64, dir: Option<&Path>) -> CommandSpec {
        let mut argv = vec![self.program.clone()];
        argv.extend(command.args());

        let mut spec = CommandSpec::new(command.name(), argv, timeout_secs);
        spec.envs = self.envs.clone();
        if let Some(dir) = dir {
            spec = spec.in_dir(dir);
        }
        spec
    }
}
