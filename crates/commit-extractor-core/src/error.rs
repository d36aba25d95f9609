//! Error taxonomy for the extractor.

/// Errors produced while validating configuration inputs.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid numeric input for {name}: {value:?}")]
    InvalidNumber { name: &'static str, value: String },

    #[error("{name} must be greater than 0")]
    NotPositive { name: &'static str },

    #[error("{name} is out of range: {value}")]
    OutOfRange { name: &'static str, value: String },

    #[error("invalid output_format: {0}. Must be text, json, or csv")]
    InvalidOutputFormat(String),
}

/// Fatal pipeline errors. Every variant terminates the run with exit code 1.
#[derive(Debug, thiserror::Error)]
pub enum ExtractorError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{stage} timed out after {secs} seconds")]
    Timeout { stage: String, secs: u64 },

    #[error("failed to fetch commit messages: git log exited with code {exit_code}: {stderr}")]
    FetchFailed { exit_code: i32, stderr: String },

    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("no environment information extracted and fail_on_empty is set to true")]
    EmptyExtraction,

    #[error("failed to write output file {path}: {source}")]
    PublishWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("process interrupted by user")]
    Interrupted,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for extractor operations.
pub type Result<T> = std::result::Result<T, ExtractorError>;
