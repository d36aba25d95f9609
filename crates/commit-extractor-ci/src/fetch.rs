//! Commit history fetching.

use std::path::Path;

use commit_extractor_core::{ExtractorError, Result, NO_COMMITS_SENTINEL};
use tracing::{debug, info};

use crate::git::{GitCli, GitCommand};
use crate::runner::CommandRunner;

/// Fetch the last `commit_limit` commit records from the repository at `workdir`.
///
/// Returns [`NO_COMMITS_SENTINEL`] when `workdir` has no `.git` directory.
/// With `pretty`, only message bodies are requested (`--pretty=%B`). The
/// output is returned verbatim, newest first. A timeout or a non-zero exit
/// from `git log` is fatal.
pub async fn fetch_commit_messages(
    git: &GitCli,
    workdir: &Path,
    commit_limit: u32,
    pretty: bool,
    timeout_secs: u64,
) -> Result<String> {
    if !workdir.join(".git").is_dir() {
        info!(workdir = %workdir.display(), "No git repository available");
        return Ok(NO_COMMITS_SENTINEL.to_string());
    }

    let spec = git.spec(
        &GitCommand::Log {
            limit: commit_limit,
            pretty,
        },
        timeout_secs,
        Some(workdir),
    );
    debug!(command = %spec.display(), timeout_secs, "Executing git log");

    let output = CommandRunner::execute(&spec).await?;
    if !output.passed() {
        debug!(exit_code = output.exit_code, stderr = %output.stderr.trim(), "git log failed");
        return Err(ExtractorError::FetchFailed {
            exit_code: output.exit_code,
            stderr: output.stderr.trim().to_string(),
        });
    }

    if !output.stdout.is_empty() {
        info!("Last {} commits:", commit_limit);
        for line in output.stdout.split('\n').filter(|l| !l.is_empty()) {
            info!("    {}", line);
        }
    }

    Ok(output.stdout)
}
