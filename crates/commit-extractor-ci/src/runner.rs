//! Bounded subprocess execution.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::{Duration, Instant};

use commit_extractor_core::{ExtractorError, Result};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// A subprocess invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandSpec {
    /// Human-readable name, used in timeout errors.
    pub name: String,

    /// Command to execute (first element is executable).
    pub command: Vec<String>,

    /// Text written to the child's stdin; `None` attaches /dev/null.
    pub stdin: Option<String>,

    /// Working directory for the child.
    pub current_dir: Option<PathBuf>,

    /// Extra environment variables.
    pub envs: Vec<(String, String)>,

    /// Timeout in seconds (0 = unbounded).
    pub timeout_secs: u64,
}

impl CommandSpec {
    /// Create a spec with no stdin and the inherited working directory.
    pub fn new(name: impl Into<String>, command: Vec<String>, timeout_secs: u64) -> Self {
        Self {
            name: name.into(),
            command,
            timeout_secs,
            ..Self::default()
        }
    }

    /// Feed `input` to the child's stdin.
    pub fn with_stdin(mut self, input: impl Into<String>) -> Self {
        self.stdin = Some(input.into());
        self
    }

    /// Run the child in `dir`.
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// Space-joined command line, for logging.
    pub fn display(&self) -> String {
        self.command.join(" ")
    }
}

/// Result of a subprocess execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Spec name.
    pub name: String,

    /// Exit code (-1 when terminated by a signal).
    pub exit_code: i32,

    /// Captured stdout.
    pub stdout: String,

    /// Captured stderr.
    pub stderr: String,

    /// Duration in milliseconds.
    pub duration_ms: u64,

    /// Whether the process reported success.
    pub success: bool,
}

impl CommandOutput {
    /// Whether this command passed (exit code 0).
    pub fn passed(&self) -> bool {
        self.success && self.exit_code == 0
    }
}

/// Executes a [`CommandSpec`] under its timeout.
pub struct CommandRunner;

impl CommandRunner {
    /// Execute a command and capture its output.
    ///
    /// Stdin is written while stdout/stderr are drained so a large input
    /// cannot fill the pipe. A child that exits without reading its stdin is
    /// not an error. On timeout the child is killed and
    /// [`ExtractorError::Timeout`] is returned.
    pub async fn execute(spec: &CommandSpec) -> Result<CommandOutput> {
        let start = Instant::now();

        let Some((exe, args)) = spec.command.split_first() else {
            return Err(ExtractorError::Spawn {
                program: spec.name.clone(),
                source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "empty command"),
            });
        };

        let mut command = Command::new(exe);
        command
            .args(args)
            .envs(spec.envs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(if spec.stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = &spec.current_dir {
            command.current_dir(dir);
        }

        let mut child = command.spawn().map_err(|source| ExtractorError::Spawn {
            program: exe.clone(),
            source,
        })?;

        let stdin = child.stdin.take();
        let input = spec.stdin.clone().unwrap_or_default();
        let feed = async move {
            if let Some(mut stdin) = stdin {
                match stdin.write_all(input.as_bytes()).await {
                    Err(e) if e.kind() != std::io::ErrorKind::BrokenPipe => return Err(e),
                    _ => {}
                }
            }
            Ok(())
        };
        let run = async move {
            let (fed, output) = tokio::join!(feed, child.wait_with_output());
            fed?;
            output
        };

        // Zero leaves the run unbounded for library callers; validated
        // configuration never produces it.
        let output = if spec.timeout_secs > 0 {
            tokio::time::timeout(Duration::from_secs(spec.timeout_secs), run)
                .await
                .map_err(|_| ExtractorError::Timeout {
                    stage: spec.name.clone(),
                    secs: spec.timeout_secs,
                })??
        } else {
            run.await?
        };

        let duration_ms = start.elapsed().as_millis() as u64;
        let exit_code = output.status.code().unwrap_or(-1);
        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        Ok(CommandOutput {
            name: spec.name.clone(),
            exit_code,
            stdout,
            stderr,
            duration_ms,
            success: output.status.success(),
        })
    }
}
