//! Extract command: the shell filter applied to fetched commit text.
//!
//! The filter is a capability boundary. [`Transform`] takes text in and
//! returns stdout, stderr and an exit status; [`ShellTransform`] is the only
//! production implementation and runs the configured command through bash
//! with the commit text on stdin.

use std::path::PathBuf;

use async_trait::async_trait;
use commit_extractor_core::{is_blank, unique_sorted_lines, ExtractorError, Result};
use tracing::{debug, info, warn};

use crate::runner::{CommandRunner, CommandSpec};

/// Output of a transform invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

/// Text-in / text-out filter over commit messages.
#[async_trait]
pub trait Transform: Send + Sync {
    /// Description used in logs (the command line for shell transforms).
    fn describe(&self) -> &str;

    /// Run the filter on `input`.
    ///
    /// Errors only when the filter could not be run at all or exceeded
    /// `timeout_secs`; a non-zero exit status is reported in the output.
    async fn apply(&self, input: &str, timeout_secs: u64) -> Result<TransformOutput>;
}

/// Runs a shell command line with `<shell> -c`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellTransform {
    shell: String,
    command: String,
    workdir: Option<PathBuf>,
}

impl ShellTransform {
    pub const DEFAULT_SHELL: &'static str = "/bin/bash";

    pub fn new(command: impl Into<String>) -> Self {
        Self {
            shell: Self::DEFAULT_SHELL.to_string(),
            command: command.into(),
            workdir: None,
        }
    }

    /// Use a different interpreter.
    pub fn with_shell(mut self, shell: impl Into<String>) -> Self {
        self.shell = shell.into();
        self
    }

    /// Run the command in `dir`.
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.workdir = Some(dir.into());
        self
    }
}

#[async_trait]
impl Transform for ShellTransform {
    fn describe(&self) -> &str {
        &self.command
    }

    async fn apply(&self, input: &str, timeout_secs: u64) -> Result<TransformOutput> {
        let mut spec = CommandSpec::new(
            "Extract command",
            vec![self.shell.clone(), "-c".to_string(), self.command.clone()],
            timeout_secs,
        )
        .with_stdin(input);
        if let Some(dir) = &self.workdir {
            spec = spec.in_dir(dir);
        }

        let output = CommandRunner::execute(&spec).await?;
        Ok(TransformOutput {
            stdout: output.stdout,
            stderr: output.stderr,
            exit_code: output.exit_code,
        })
    }
}

/// Derive the published value from the fetched commit text.
///
/// Without a transform the text is returned verbatim. With one, its stdout
/// is reduced to sorted unique non-blank lines whatever the exit code; an
/// exit code above 1 with stderr output is logged as a warning. A blank
/// result is fatal when `fail_on_empty` is set.
pub async fn extract_environment(
    commit_messages: &str,
    transform: Option<&dyn Transform>,
    fail_on_empty: bool,
    timeout_secs: u64,
) -> Result<String> {
    let environment = match transform {
        None => commit_messages.to_string(),
        Some(transform) => {
            info!(command = %transform.describe(), "Using extract command");
            debug!(input_len = commit_messages.len(), "Extract command input");

            let output = transform.apply(commit_messages, timeout_secs).await?;
            debug!(
                exit_code = output.exit_code,
                output_len = output.stdout.len(),
                "Extract command finished"
            );

            // Filters such as grep exit 1 for "no match".
            if output.exit_code > 1 && !output.stderr.is_empty() {
                warn!(
                    exit_code = output.exit_code,
                    stderr = %output.stderr.trim(),
                    "Extract command warning"
                );
            }

            unique_sorted_lines(&output.stdout)
        }
    };

    if is_blank(&environment) {
        if fail_on_empty {
            return Err(ExtractorError::EmptyExtraction);
        }
        info!("No environment information extracted");
        return Ok(environment);
    }

    let matches = environment.split('\n').filter(|l| !l.is_empty()).count();
    if matches > 1 {
        info!("Found {} unique matches", matches);
    }
    info!("Extracted value: {}", environment);

    Ok(environment)
}
