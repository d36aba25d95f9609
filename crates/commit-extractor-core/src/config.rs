//! Configuration inputs and their validation.
//!
//! The CLI collects every option as a raw string (flag or `INPUT_*` variable)
//! and hands a [`RawInputs`] to [`ExtractorConfig::from_inputs`]. All
//! validation happens here, before any pipeline stage runs.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::{
    OutputFormat, DEFAULT_COMMIT_LIMIT, DEFAULT_KEY_VARIABLE, DEFAULT_SAFE_DIRECTORIES,
    DEFAULT_TIMEOUT_SECS,
};
use crate::error::ConfigError;

/// Unvalidated inputs exactly as received.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawInputs {
    pub debug: String,
    pub commit_limit: String,
    pub timeout: String,
    pub pretty: String,
    pub key_variable: String,
    pub extract_command: String,
    pub fail_on_empty: String,
    pub output_format: String,
    /// Comma-separated; `None` keeps the defaults, `Some("")` trusts nothing.
    pub safe_directories: Option<String>,
    pub workdir: String,
    pub log_json: String,
}

/// Validated configuration, threaded explicitly through every stage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExtractorConfig {
    /// Verbose diagnostic logging.
    pub debug: bool,

    /// Number of most-recent commits fetched.
    pub commit_limit: u32,

    /// Bound for every fetch / transform subprocess, in seconds.
    pub timeout_secs: u64,

    /// Request message bodies only (`--pretty=%B`).
    pub pretty: bool,

    /// Output key name.
    pub key_variable: String,

    /// Shell filter applied to the commit text.
    pub extract_command: Option<String>,

    /// Abort when the extracted value is blank.
    pub fail_on_empty: bool,

    /// Payload encoding.
    pub output_format: OutputFormat,

    /// Paths registered as `safe.directory`.
    pub safe_directories: Vec<PathBuf>,

    /// Repository directory.
    pub workdir: PathBuf,

    /// Emit JSON log lines.
    pub log_json: bool,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            debug: false,
            commit_limit: DEFAULT_COMMIT_LIMIT,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            pretty: false,
            key_variable: DEFAULT_KEY_VARIABLE.to_string(),
            extract_command: None,
            fail_on_empty: false,
            output_format: OutputFormat::Text,
            safe_directories: DEFAULT_SAFE_DIRECTORIES.iter().map(PathBuf::from).collect(),
            workdir: PathBuf::from("."),
            log_json: false,
        }
    }
}

impl ExtractorConfig {
    /// Validate raw inputs.
    ///
    /// Numeric inputs must parse as integers greater than zero; an empty
    /// numeric input takes its default. A commit limit beyond `u32` is
    /// rejected rather than clamped. The output format is matched
    /// case-insensitively against `text`, `json` and `csv`.
    pub fn from_inputs(raw: &RawInputs) -> Result<Self, ConfigError> {
        let commit_limit = match parse_positive("commit_limit", &raw.commit_limit)? {
            Some(n) => u32::try_from(n).map_err(|_| ConfigError::OutOfRange {
                name: "commit_limit",
                value: n.to_string(),
            })?,
            None => DEFAULT_COMMIT_LIMIT,
        };
        let timeout_secs =
            parse_positive("timeout", &raw.timeout)?.unwrap_or(DEFAULT_TIMEOUT_SECS);

        let output_format = if raw.output_format.trim().is_empty() {
            OutputFormat::default()
        } else {
            raw.output_format.parse()?
        };

        let extract_command = Some(raw.extract_command.trim())
            .filter(|c| !c.is_empty())
            .map(str::to_string);

        let safe_directories = match &raw.safe_directories {
            None => DEFAULT_SAFE_DIRECTORIES.iter().map(PathBuf::from).collect(),
            Some(list) => list
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(PathBuf::from)
                .collect(),
        };

        let workdir = if raw.workdir.trim().is_empty() {
            PathBuf::from(".")
        } else {
            PathBuf::from(raw.workdir.trim())
        };

        Ok(Self {
            debug: parse_flag(&raw.debug),
            commit_limit,
            timeout_secs,
            pretty: parse_flag(&raw.pretty),
            key_variable: raw.key_variable.clone(),
            extract_command,
            fail_on_empty: parse_flag(&raw.fail_on_empty),
            output_format,
            safe_directories,
            workdir,
            log_json: parse_flag(&raw.log_json),
        })
    }
}

/// Interpret a bool-like input: `true`, `1`, `yes`, `on` (any case).
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}

fn parse_positive(name: &'static str, value: &str) -> Result<Option<u64>, ConfigError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    let n: i64 = value.parse().map_err(|_| ConfigError::InvalidNumber {
        name,
        value: value.to_string(),
    })?;
    if n <= 0 {
        return Err(ConfigError::NotPositive { name });
    }
    Ok(Some(n as u64))
}
