//! Domain types passed between pipeline stages.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Published when the working directory has no `.git` metadata directory.
pub const NO_COMMITS_SENTINEL: &str = "No commit messages available.";

/// Output key used when none is configured.
pub const DEFAULT_KEY_VARIABLE: &str = "ENVIRONMENT";

pub const DEFAULT_COMMIT_LIMIT: u32 = 10;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Paths marked as `safe.directory` unless overridden.
pub const DEFAULT_SAFE_DIRECTORIES: &[&str] = &["/usr/src", "/github/workspace"];

/// Payload encoding for the published value.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Newline-joined text, unchanged.
    #[default]
    Text,

    /// Compact JSON array of strings.
    Json,

    /// Single comma-joined CSV record.
    Csv,
}

impl OutputFormat {
    /// Get the format name as a string.
    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(ConfigError::InvalidOutputFormat(other.to_string())),
        }
    }
}

/// A key/value pair handed to the CI orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutputBinding {
    /// Variable name; never empty.
    pub key: String,

    /// Formatted payload.
    pub value: String,
}

impl OutputBinding {
    /// Create a binding, falling back to [`DEFAULT_KEY_VARIABLE`] for an empty key.
    pub fn new(key: &str, value: impl Into<String>) -> Self {
        let key = key.trim();
        let key = if key.is_empty() {
            DEFAULT_KEY_VARIABLE
        } else {
            key
        };
        Self {
            key: key.to_string(),
            value: value.into(),
        }
    }
}
