//! In-memory [`Transform`] for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use commit_extractor_core::Result;

use crate::transform::{Transform, TransformOutput};

/// Returns a fixed output and remembers the last input it was given.
#[derive(Debug, Default)]
pub struct StaticTransform {
    output: TransformOutput,
    received: Mutex<Option<String>>,
}

impl StaticTransform {
    pub fn new(stdout: impl Into<String>, exit_code: i32) -> Self {
        Self {
            output: TransformOutput {
                stdout: stdout.into(),
                stderr: String::new(),
                exit_code,
            },
            received: Mutex::new(None),
        }
    }

    pub fn with_stderr(mut self, stderr: impl Into<String>) -> Self {
        self.output.stderr = stderr.into();
        self
    }

    /// Input passed to the most recent `apply` call.
    pub fn received(&self) -> Option<String> {
        self.received.lock().ok().and_then(|r| r.clone())
    }
}

#[async_trait]
impl Transform for StaticTransform {
    fn describe(&self) -> &str {
        "static"
    }

    async fn apply(&self, input: &str, _timeout_secs: u64) -> Result<TransformOutput> {
        if let Ok(mut received) = self.received.lock() {
            *received = Some(input.to_string());
        }
        Ok(self.output.clone())
    }
}
