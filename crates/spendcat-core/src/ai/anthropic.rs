//! Anthropic Messages API backend
//!
//! Sends the built prompt as the only user turn of a fresh conversation:
//! no system prompt, no history, no tools, no streaming. One attempt per
//! call; transport and API errors are returned to the caller untouched.
//!
//! # Configuration
//!
//! Environment variables:
//! - `ANTHROPIC_API_KEY`: API key (required)
//! - `ANTHROPIC_BASE_URL`: API root (default: `https://api.anthropic.com`)
//! - `ANTHROPIC_MODEL`: Model override (default: [`DEFAULT_MODEL`])

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ClassificationBackend;
use crate::error::{Error, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
/// Reply length ceiling for a categorization
pub const MAX_TOKENS: u32 = 1000;
const API_VERSION: &str = "2023-06-01";

/// Anthropic Messages API request
#[derive(Debug, Serialize)]
pub struct MessagesRequest {
    pub model: String,
    pub max_tokens: u32,
    pub messages: Vec<Message>,
}

/// Message in conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    /// Create a user message with text content
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: "user".into(),
            content: text.into(),
        }
    }
}

/// Content block types
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },

    /// Any block kind we never ask for (tool use, thinking, ...)
    #[serde(other)]
    Other,
}

/// Anthropic Messages API response
#[derive(Debug, Deserialize)]
pub struct MessagesResponse {
    pub content: Vec<ContentBlock>,
    #[serde(default)]
    pub stop_reason: Option<String>, // "end_turn", "max_tokens"
    #[serde(default)]
    pub usage: Option<Usage>,
}

/// Token usage information
#[derive(Debug, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl MessagesResponse {
    /// First text segment of the reply
    pub fn first_text(&self) -> Option<&str> {
        self.content.iter().find_map(|block| match block {
            ContentBlock::Text { text } => Some(text.as_str()),
            ContentBlock::Other => None,
        })
    }
}

/// Hosted classification backend
#[derive(Clone)]
pub struct AnthropicBackend {
    http_client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl AnthropicBackend {
    /// Create a backend against the public API with the default model
    pub fn new(api_key: &str) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, api_key, DEFAULT_MODEL)
    }

    /// Create a backend against a specific API root
    pub fn with_base_url(base_url: &str, api_key: &str, model: &str) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }

    /// Create from environment (ANTHROPIC_*)
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Create from ANTHROPIC_* variables looked up through `var`
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = var("ANTHROPIC_API_KEY")
            .ok_or_else(|| Error::MissingConfig("ANTHROPIC_API_KEY is not set".into()))?;
        let base_url = var("ANTHROPIC_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let model = var("ANTHROPIC_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
        Ok(Self::with_base_url(&base_url, &api_key, &model))
    }

    /// Send a single-turn conversation and return the parsed response
    pub async fn messages(&self, prompt: &str) -> Result<MessagesResponse> {
        let request = MessagesRequest {
            model: self.model.clone(),
            max_tokens: MAX_TOKENS,
            messages: vec![Message::user(prompt)],
        };

        debug!(
            model = %self.model,
            prompt_chars = prompt.len(),
            "Sending categorization request"
        );

        let response = self
            .http_client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api { status, body });
        }

        let messages_response: MessagesResponse = response.json().await?;

        debug!(
            stop_reason = ?messages_response.stop_reason,
            usage = ?messages_response
                .usage
                .as_ref()
                .map(|u| (u.input_tokens, u.output_tokens)),
            "Received categorization response"
        );

        Ok(messages_response)
    }
}

#[async_trait]
impl ClassificationBackend for AnthropicBackend {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let response = self.messages(prompt).await?;
        response
            .first_text()
            .map(String::from)
            .ok_or_else(|| Error::InvalidData("No text in response".into()))
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn host(&self) -> &str {
        &self.base_url
    }
}
