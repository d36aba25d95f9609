//! Extractor pipeline orchestration.

use std::time::Instant;

use commit_extractor_core::{format_output, ExtractorConfig, OutputBinding, Result};
use serde::Serialize;
use tracing::{debug, info, Instrument};

use crate::fetch::fetch_commit_messages;
use crate::git::GitCli;
use crate::publish::{publish, PublishMode, PublishTarget};
use crate::transform::{extract_environment, ShellTransform, Transform};
use crate::trust::{configure_safe_directories, TrustReport};

/// Result of a complete extractor run.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    /// Paths marked as safe directories.
    pub trust: TrustReport,

    /// Length of the fetched commit text.
    pub commit_messages_len: usize,

    /// Value after the extract stage, before formatting.
    pub extracted: String,

    /// The published binding (formatted payload).
    pub binding: OutputBinding,

    /// Where the binding went.
    pub mode: PublishMode,

    /// Total duration in milliseconds.
    pub duration_ms: u64,
}

/// Single-pass extractor pipeline: trust, fetch, extract, format, publish.
pub struct ExtractorPipeline;

impl ExtractorPipeline {
    /// Run with the system `git` and a bash-backed extract command.
    pub async fn run(config: &ExtractorConfig, target: &PublishTarget) -> Result<PipelineReport> {
        let transform = config
            .extract_command
            .as_deref()
            .map(|command| ShellTransform::new(command).in_dir(&config.workdir));

        Self::run_with(
            config,
            &GitCli::default(),
            transform.as_ref().map(|t| t as &dyn Transform),
            target,
        )
        .await
    }

    /// Run with explicit collaborators.
    ///
    /// Stages run strictly in order and each hands its output to the next by
    /// value. The first fatal error stops the run; nothing is published
    /// after a failure.
    pub async fn run_with(
        config: &ExtractorConfig,
        git: &GitCli,
        transform: Option<&dyn Transform>,
        target: &PublishTarget,
    ) -> Result<PipelineReport> {
        let span = tracing::info_span!("extractor.run", format = %config.output_format);
        Self::run_stages(config, git, transform, target)
            .instrument(span)
            .await
    }

    async fn run_stages(
        config: &ExtractorConfig,
        git: &GitCli,
        transform: Option<&dyn Transform>,
        target: &PublishTarget,
    ) -> Result<PipelineReport> {
        let start = Instant::now();

        debug!(
            commit_limit = config.commit_limit,
            timeout_secs = config.timeout_secs,
            output_format = %config.output_format,
            pretty = config.pretty,
            fail_on_empty = config.fail_on_empty,
            "Starting extractor pipeline"
        );

        info!("Configuring Git");
        let trust = configure_safe_directories(git, &config.safe_directories).await;

        info!("Fetching Commit Messages");
        let commit_messages = fetch_commit_messages(
            git,
            &config.workdir,
            config.commit_limit,
            config.pretty,
            config.timeout_secs,
        )
        .await?;

        info!("Extracting Environment Information");
        let extracted = extract_environment(
            &commit_messages,
            transform,
            config.fail_on_empty,
            config.timeout_secs,
        )
        .await?;

        info!(output_format = %config.output_format, "Formatting Output");
        let payload = format_output(&extracted, config.output_format);

        let binding = OutputBinding::new(&config.key_variable, payload);
        let mode = publish(&binding, target)?;

        let duration_ms = start.elapsed().as_millis() as u64;
        info!(duration_ms, "Process Completed Successfully");

        Ok(PipelineReport {
            trust,
            commit_messages_len: commit_messages.len(),
            extracted,
            binding,
            mode,
            duration_ms,
        })
    }
}
