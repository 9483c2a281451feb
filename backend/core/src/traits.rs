use anyhow::Result;
use async_trait::async_trait;

/// One transcription request to the vision capability.
///
/// Each call carries a fresh `session_id`; no conversational state is
/// retained between calls.
#[derive(Debug, Clone)]
pub struct VisionRequest {
    pub image_base64: String,
    pub mime_type: String,
    pub system_prompt: String,
    pub user_prompt: String,
    pub session_id: String,
}

/// The external image-to-text capability: given an image and a prompt,
/// return the model's free-form textual reply.
#[async_trait]
pub trait TableVision: Send + Sync {
    /// Provider name (e.g., "openai", "mock").
    fn name(&self) -> &str;

    /// Send one request and await the single textual response.
    async fn transcribe(&self, request: &VisionRequest) -> Result<String>;
}
