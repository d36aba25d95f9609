//! Repository trust configuration (`safe.directory`).

use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, info};

use crate::git::{GitCli, GitCommand, TRUST_TIMEOUT_SECS};
use crate::runner::CommandRunner;

/// Outcome of marking paths as safe directories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TrustReport {
    pub trusted: Vec<PathBuf>,
    pub failed: Vec<PathBuf>,
}

/// Register each path as a git `safe.directory`.
///
/// Every path is attempted independently under [`TRUST_TIMEOUT_SECS`]. A
/// failure (launch error, non-zero exit or timeout) is logged and the next
/// path is tried; this function never fails.
pub async fn configure_safe_directories(git: &GitCli, paths: &[PathBuf]) -> TrustReport {
    let mut report = TrustReport::default();

    for path in paths {
        let spec = git.spec(
            &GitCommand::TrustDirectory(path.clone()),
            TRUST_TIMEOUT_SECS,
            None,
        );

        match CommandRunner::execute(&spec).await {
            Ok(output) if output.passed() => {
                debug!(path = %path.display(), "Marked safe.directory");
                report.trusted.push(path.clone());
            }
            Ok(output) => {
                debug!(
                    path = %path.display(),
                    exit_code = output.exit_code,
                    stderr = %output.stderr.trim(),
                    "Failed to configure safe.directory"
                );
                report.failed.push(path.clone());
            }
            Err(e) => {
                debug!(path = %path.display(), error = %e, "Failed to configure safe.directory");
                report.failed.push(path.clone());
            }
        }
    }

    info!(
        trusted = report.trusted.len(),
        failed = report.failed.len(),
        "Git configuration completed"
    );
    report
}
