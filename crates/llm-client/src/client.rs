//! HTTP client for OpenAI-compatible chat completion endpoints.

use async_trait::async_trait;
use reqwest::{header, Client};
use tracing::{debug, warn};

use crate::config::LlmConfig;
use crate::error::{LlmError, Result};
use crate::types::{ChatRequest, ChatResponseRaw, CompletionRequest};
use crate::ChatModel;

/// Chat completions client.
#[derive(Clone, Debug)]
pub struct ChatClient {
    http_client: Client,
    config: LlmConfig,
}

impl ChatClient {
    /// Create a client; the config's timeout applies to every request.
    pub fn new(config: LlmConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LlmError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            config,
        })
    }

    /// Create from environment variable `GEMINI_API_KEY` with default settings.
    pub fn from_env() -> Result<Self> {
        Self::new(LlmConfig::from_env()?)
    }

    pub fn config(&self) -> &LlmConfig {
        &self.config
    }
}

#[async_trait]
impl ChatModel for ChatClient {
    fn model(&self) -> &str {
        &self.config.model
    }

    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        let start = std::time::Instant::now();
        let schema_name = request.schema_name.clone();
        let body =
            ChatRequest::from_completion(&self.config.model, self.config.temperature, request);

        let response = self
            .http_client
            .post(self.config.completions_url())
            .header(header::AUTHORIZATION, format!("Bearer {}", self.config.api_key))
            .header(header::CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Chat completion request failed");
                LlmError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "Chat completion API error");
            return Err(LlmError::from_status(status.as_u16(), error_text));
        }

        let raw: ChatResponseRaw = response
            .json()
            .await
            .map_err(|e| LlmError::Parse(e.to_string()))?;

        if let Some(usage) = &raw.usage {
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Token usage"
            );
        }

        let content = raw
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| LlmError::Parse("No content in model response".into()))?;

        debug!(
            model = %self.config.model,
            schema = %schema_name,
            duration_ms = start.elapsed().as_millis(),
            "Chat completion"
        );

        Ok(content)
    }
}
