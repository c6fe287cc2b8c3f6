//! Provider seam for every LLM call the backend makes.
//!
//! Handlers and services only see [`LlmClient`]; [`AnthropicClient`] is the
//! production implementation speaking the Anthropic Messages API over
//! `reqwest`. Tests swap in a scripted implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::session_manager::{Message, MessageRole};
use crate::config::AppConfig;

const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API key is not configured")]
    MissingApiKey,
    #[error("http: {0}")]
    Http(#[from] reqwest::Error),
    #[error("provider returned {status}: {message}")]
    Api { status: StatusCode, message: String },
    #[error("empty response")]
    EmptyResponse,
}

/// One provider call: optional system instruction plus a user/assistant history.
#[derive(Clone, Debug)]
pub struct CompletionRequest {
    pub system: Option<String>,
    pub messages: Vec<Message>,
    pub max_tokens: u32,
    pub temperature: Option<f32>,
}

impl CompletionRequest {
    /// Build a request from a transcript, folding every system message into
    /// the `system` field since the Messages API only accepts user/assistant turns.
    pub fn from_transcript(transcript: Vec<Message>, max_tokens: u32) -> Self {
        let (system, messages): (Vec<Message>, Vec<Message>) = transcript
            .into_iter()
            .partition(|m| m.role == MessageRole::System);
        let system = (!system.is_empty()).then(|| {
            system
                .into_iter()
                .map(|m| m.content)
                .collect::<Vec<_>>()
                .join("\n\n")
        });
        Self { system, messages, max_tokens, temperature: None }
    }
}

#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Whether a credential is present. Callers check this before issuing a call.
    fn is_configured(&self) -> bool;

    /// Send one request and return the generated text.
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError>;
}

pub struct AnthropicClient {
    http: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
    temperature: f32,
}

impl AnthropicClient {
    pub fn new(
        api_key: Option<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
        temperature: f32,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("slidegen-backend/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            temperature,
        })
    }

    pub fn from_config(cfg: &AppConfig) -> Result<Self, LlmError> {
        Self::new(
            cfg.anthropic_api_key.clone(),
            cfg.anthropic_base_url.clone(),
            cfg.model.clone(),
            cfg.temperature,
            cfg.llm_timeout,
        )
    }
}

#[derive(Serialize)]
struct WireRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    messages: &'a [Message],
}

#[derive(Deserialize)]
struct WireResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    Text { text: String },
    #[serde(other)]
    Other,
}

#[derive(Deserialize)]
struct WireErrorEnvelope {
    error: WireError,
}

#[derive(Deserialize)]
struct WireError {
    message: String,
}

#[async_trait]
impl LlmClient for AnthropicClient {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError> {
        let api_key = self.api_key.as_deref().ok_or(LlmError::MissingApiKey)?;

        let body = WireRequest {
            model: &self.model,
            max_tokens: request.max_tokens,
            temperature: request.temperature.unwrap_or(self.temperature),
            system: request.system.as_deref(),
            messages: &request.messages,
        };

        debug!(model = %self.model, messages = request.messages.len(), "sending completion request");
        let resp = self
            .http
            .post(format!("{}/messages", self.base_url))
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let raw = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<WireErrorEnvelope>(&raw)
                .map(|e| e.error.message)
                .unwrap_or(raw);
            return Err(LlmError::Api { status, message });
        }

        let parsed: WireResponse = resp.json().await?;
        let text = join_text_blocks(parsed.content);
        if text.is_empty() {
            return Err(LlmError::EmptyResponse);
        }
        Ok(text)
    }
}

fn join_text_blocks(blocks: Vec<ContentBlock>) -> String {
    blocks
        .into_iter()
        .filter_map(|b| match b {
            ContentBlock::Text { text } => Some(text),
            ContentBlock::Other => None,
        })
        .collect()
}
