//! Commit Info Extractor Core
//!
//! Domain types and pure logic shared by the pipeline crates:
//! - `config`: raw input parsing and validation
//! - `extract`: line deduplication and ordering
//! - `format`: text / JSON / CSV payload encoding
//! - `telemetry`: tracing subscriber setup

pub mod config;
pub mod domain;
pub mod error;
pub mod extract;
pub mod format;
pub mod telemetry;

#[cfg(test)]
mod proptest;

pub use config::{parse_flag, ExtractorConfig, RawInputs};
pub use domain::{
    OutputBinding, OutputFormat, DEFAULT_COMMIT_LIMIT, DEFAULT_KEY_VARIABLE,
    DEFAULT_SAFE_DIRECTORIES, DEFAULT_TIMEOUT_SECS, NO_COMMITS_SENTINEL,
};
pub use error::{ConfigError, ExtractorError, Result};
pub use extract::{is_blank, unique_sorted_lines};
pub use format::{format_output, to_csv_record, to_json_array};
pub use telemetry::{init_tracing, level_for};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
