//! Fixed-stub vision provider for local development and tests.

use anyhow::Result;
use async_trait::async_trait;

use gridscan_core::{TableVision, VisionRequest};

/// Canned reply: the placeholder grid, fenced the way a real model
/// typically fences its JSON.
const PLACEHOLDER_REPLY: &str = "```json\n[[\"Name\",\"Age\",\"City\"],[\"John\",\"25\",\"NYC\"],[\"Alice\",\"30\",\"LA\"]]\n```";

pub struct MockVision {
    reply: String,
}

impl MockVision {
    pub fn new() -> Self {
        Self {
            reply: PLACEHOLDER_REPLY.to_string(),
        }
    }

    /// Override the canned reply (used by tests to script responses).
    pub fn with_reply(mut self, reply: impl Into<String>) -> Self {
        self.reply = reply.into();
        self
    }
}

impl Default for MockVision {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TableVision for MockVision {
    fn name(&self) -> &str {
        "mock"
    }

    async fn transcribe(&self, _request: &VisionRequest) -> Result<String> {
        Ok(self.reply.clone())
    }
}
