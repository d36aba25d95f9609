//! Publishing the output binding to the CI orchestrator.
//!
//! Under GitHub Actions both `GITHUB_ENV` and `GITHUB_OUTPUT` name files the
//! runner reads after the step. Each receives the same heredoc-style block:
//!
//! ```text
//! value_variable<<EOF_1700000000
//! <payload>
//! EOF_1700000000
//! key_variable=<key>
//! ```
//!
//! Outside Actions the binding is printed to stdout instead.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use commit_extractor_core::{ExtractorError, OutputBinding, Result};
use serde::Serialize;
use tracing::info;

pub const GITHUB_ENV: &str = "GITHUB_ENV";
pub const GITHUB_OUTPUT: &str = "GITHUB_OUTPUT";

/// Where a binding is published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishTarget {
    /// Append to both CI files.
    Files {
        env_file: PathBuf,
        output_file: PathBuf,
    },

    /// Print to stdout (local / dry run).
    Console,
}

/// How a binding was actually published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PublishMode {
    Files,
    Console,
}

impl PublishTarget {
    /// Resolve from `GITHUB_ENV` / `GITHUB_OUTPUT` in the process environment.
    pub fn from_env() -> Self {
        Self::from_paths(
            std::env::var_os(GITHUB_ENV).map(PathBuf::from),
            std::env::var_os(GITHUB_OUTPUT).map(PathBuf::from),
        )
    }

    /// Files only when both paths are present and non-empty.
    pub fn from_paths(env_file: Option<PathBuf>, output_file: Option<PathBuf>) -> Self {
        match (env_file, output_file) {
            (Some(env_file), Some(output_file))
                if !env_file.as_os_str().is_empty() && !output_file.as_os_str().is_empty() =>
            {
                PublishTarget::Files {
                    env_file,
                    output_file,
                }
            }
            _ => PublishTarget::Console,
        }
    }
}

/// Heredoc delimiter for a Unix timestamp.
pub fn heredoc_delimiter(unix_secs: i64) -> String {
    format!("EOF_{unix_secs}")
}

/// Block appended to each CI file.
pub fn render_block(binding: &OutputBinding, delimiter: &str) -> String {
    format!(
        "value_variable<<{delimiter}\n{}\n{delimiter}\nkey_variable={}\n",
        binding.value, binding.key
    )
}

fn append(path: &Path, block: &str) -> Result<()> {
    let map_err = |source| ExtractorError::PublishWrite {
        path: path.display().to_string(),
        source,
    };
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(map_err)?;
    file.write_all(block.as_bytes()).map_err(map_err)?;
    Ok(())
}

/// Publish `binding` to `target`. A failed write to either file is fatal.
pub fn publish(binding: &OutputBinding, target: &PublishTarget) -> Result<PublishMode> {
    info!(key_variable = %binding.key, "Setting output variables");

    match target {
        PublishTarget::Files {
            env_file,
            output_file,
        } => {
            let delimiter = heredoc_delimiter(chrono::Utc::now().timestamp());
            let block = render_block(binding, &delimiter);
            append(env_file, &block)?;
            append(output_file, &block)?;
            info!("Variables set in GitHub Actions environment");
            Ok(PublishMode::Files)
        }
        PublishTarget::Console => {
            info!("Local execution - variables would be set as:");
            println!("{}={}", binding.key, binding.value);
            Ok(PublishMode::Console)
        }
    }
}
