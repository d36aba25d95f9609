//! Commit Info Extractor - CI step entry point
//!
//! Reads the last N commit messages, optionally filters them through a shell
//! command, and publishes the formatted result as a CI output variable.
//!
//! Every option can be given as a flag or through the `INPUT_*` environment
//! variable GitHub Actions sets for action inputs. Any fatal error, usage
//! errors included, is reported once and exits with code 1.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use commit_extractor_ci::{ExtractorPipeline, PublishTarget};
use commit_extractor_core::{
    init_tracing, level_for, parse_flag, ExtractorConfig, ExtractorError, RawInputs,
};
use tracing::{debug, error, info};

#[derive(Parser)]
#[command(name = "commit-info-extractor")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Extract information from recent commit messages into CI output variables", long_about = None)]
struct Cli {
    /// Enable verbose diagnostic logging
    #[arg(
        long,
        env = "INPUT_DEBUG",
        default_value = "false",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    debug: String,

    /// Number of most recent commits to read
    #[arg(long, env = "INPUT_COMMIT_LIMIT", default_value = "10")]
    commit_limit: String,

    /// Timeout in seconds for git and the extract command
    #[arg(long, env = "INPUT_TIMEOUT", default_value = "30")]
    timeout: String,

    /// Read message bodies only (git log --pretty=%B)
    #[arg(
        long,
        env = "INPUT_PRETTY",
        default_value = "false",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pretty: String,

    /// Name of the output key
    #[arg(long, env = "INPUT_KEY_VARIABLE", default_value = "ENVIRONMENT")]
    key_variable: String,

    /// Shell command the commit text is piped through
    #[arg(long, env = "INPUT_EXTRACT_COMMAND", default_value = "")]
    extract_command: String,

    /// Fail when nothing is extracted
    #[arg(
        long,
        env = "INPUT_FAIL_ON_EMPTY",
        default_value = "false",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    fail_on_empty: String,

    /// Output format: text, json or csv
    #[arg(long, env = "INPUT_OUTPUT_FORMAT", default_value = "text")]
    output_format: String,

    /// Comma-separated paths to mark as git safe.directory
    #[arg(long, env = "INPUT_SAFE_DIRECTORIES")]
    safe_directories: Option<String>,

    /// Repository directory
    #[arg(long, env = "INPUT_WORKDIR", default_value = ".")]
    workdir: String,

    /// Emit JSON-formatted log lines
    #[arg(
        long,
        env = "INPUT_LOG_JSON",
        default_value = "false",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    log_json: String,
}

impl Cli {
    fn raw_inputs(&self) -> RawInputs {
        RawInputs {
            debug: self.debug.clone(),
            commit_limit: self.commit_limit.clone(),
            timeout: self.timeout.clone(),
            pretty: self.pretty.clone(),
            key_variable: self.key_variable.clone(),
            extract_command: self.extract_command.clone(),
            fail_on_empty: self.fail_on_empty.clone(),
            output_format: self.output_format.clone(),
            safe_directories: self.safe_directories.clone(),
            workdir: self.workdir.clone(),
            log_json: self.log_json.clone(),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help and --version
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            return ExitCode::FAILURE;
        }
    };

    init_tracing(parse_flag(&cli.log_json), level_for(parse_flag(&cli.debug)));

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> Result<()> {
    let config = ExtractorConfig::from_inputs(&cli.raw_inputs()).map_err(ExtractorError::from)?;

    info!("Environment Variable Extractor");
    debug!(debug = config.debug, "Debug mode");

    let target = PublishTarget::from_env();

    tokio::select! {
        result = ExtractorPipeline::run(&config, &target) => {
            let report = result?;
            debug!(
                report = %serde_json::to_string(&report).context("Failed to serialize report")?,
                "Pipeline report"
            );
        }
        Ok(()) = tokio::signal::ctrl_c() => {
            return Err(ExtractorError::Interrupted.into());
        }
    }

    Ok(())
}
