//! Commit Info Extractor CI - pipeline stages and orchestration
//!
//! Provides the single-pass extractor pipeline that:
//! - Marks repository roots as git `safe.directory` entries
//! - Fetches the last N commit messages with `git log`
//! - Pipes them through an optional shell filter
//! - Publishes the formatted result to `GITHUB_ENV` / `GITHUB_OUTPUT`

pub mod fakes;
pub mod fetch;
pub mod git;
pub mod pipeline;
pub mod publish;
pub mod runner;
pub mod transform;
pub mod trust;

// Re-export key types
pub use fetch::fetch_commit_messages;
pub use git::{GitCli, GitCommand, TRUST_TIMEOUT_SECS};
pub use pipeline::{ExtractorPipeline, PipelineReport};
pub use publish::{publish, render_block, PublishMode, PublishTarget};
pub use runner::{CommandOutput, CommandRunner, CommandSpec};
pub use transform::{extract_environment, ShellTransform, Transform, TransformOutput};
pub use trust::{configure_safe_directories, TrustReport};
