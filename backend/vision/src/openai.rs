//! Live vision provider backed by the OpenAI chat-completions API.
//!
//! The image travels as a base64 `data:` URI content part alongside the
//! extraction prompt. One request, one reply; no conversation state.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use gridscan_core::{TableVision, VisionRequest};

pub struct OpenAiVision {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiVision {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: "gpt-4o".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[async_trait]
impl TableVision for OpenAiVision {
    fn name(&self) -> &str {
        "openai"
    }

    async fn transcribe(&self, request: &VisionRequest) -> Result<String> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": request.system_prompt },
                { "role": "user", "content": [
                    { "type": "text", "text": request.user_prompt },
                    { "type": "image_url", "image_url": {
                        "url": format!(
                            "data:{};base64,{}",
                            request.mime_type, request.image_base64
                        )
                    } }
                ]}
            ],
            "max_tokens": 4096
        });

        debug!(
            model = %self.model,
            session = %request.session_id,
            "Sending vision request to OpenAI"
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .context("OpenAI HTTP request failed")?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            bail!("OpenAI returned {}: {}", status, error_body);
        }

        let chat: ChatResponse = response
            .json()
            .await
            .context("Failed to parse OpenAI response")?;

        let content = chat
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content);

        match content {
            Some(text) => Ok(text),
            None => bail!("OpenAI response contained no message content"),
        }
    }
}
