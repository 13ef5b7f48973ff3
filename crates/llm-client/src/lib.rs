//! OpenAI-compatible chat completions client
//!
//! A minimal client for chat completion endpoints that speak the OpenAI wire
//! format (Gemini's compatibility endpoint by default). Only structured output
//! is supported: every request carries a JSON schema generated from a Rust type.
//!
//! # Example
//!
//! ```rust,ignore
//! use llm_client::{ChatClient, ChatModel, CompletionRequest};
//! use schemars::JsonSchema;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, JsonSchema)]
//! struct Verdict {
//!     passed: bool,
//! }
//!
//! let client = ChatClient::from_env()?;
//! let raw = client
//!     .complete(CompletionRequest::structured::<Verdict>(system_prompt, user_prompt))
//!     .await?;
//! let verdict: Verdict = serde_json::from_str(llm_client::strip_code_fences(&raw))?;
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod schema;
pub mod types;

pub use client::ChatClient;
pub use config::LlmConfig;
pub use error::{LlmError, Result};
pub use schema::ResponseSchema;
pub use types::{CompletionRequest, Message, Usage};

use async_trait::async_trait;

/// A model that answers structured-output requests.
///
/// [`ChatClient`] talks to a hosted endpoint; tests substitute canned responses.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Name of the model requests are sent to
    fn model(&self) -> &str;

    /// Send one request and return the raw message content.
    async fn complete(&self, request: CompletionRequest) -> Result<String>;
}

/// Strip a markdown code fence some models wrap around JSON output.
///
/// The language tag after the opening fence (`json`, `JSON`, `Json`, ...) is
/// dropped whatever its case.
pub fn strip_code_fences(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    let tag_len = rest
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(rest.len());

    rest[tag_len..].trim_end().trim_end_matches("```").trim()
}
