//! Pluggable classification backend abstraction
//!
//! # Architecture
//!
//! - `ClassificationBackend` trait: the single operation the pipeline needs
//! - `AIClient` enum: concrete wrapper providing Clone + compile-time dispatch
//! - Backend implementations: `AnthropicBackend`, `MockBackend`
//!
//! # Configuration
//!
//! Environment variables:
//! - `SPENDCAT_BACKEND`: Backend to use (anthropic, mock). Default: anthropic
//! - `ANTHROPIC_*`: see [`anthropic`]

pub mod anthropic;
mod mock;
pub mod parsing;

pub use anthropic::AnthropicBackend;
pub use mock::MockBackend;

use async_trait::async_trait;

use crate::error::Result;

/// Trait defining the interface for all classification backends
#[async_trait]
pub trait ClassificationBackend: Send + Sync {
    /// Send `prompt` as the only user turn and return the first text segment
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Get the model name (for logging)
    fn model(&self) -> &str;

    /// Get the host URL (for logging)
    fn host(&self) -> &str;
}

/// Concrete AI client enum
#[derive(Clone)]
pub enum AIClient {
    /// Hosted Messages API
    Anthropic(AnthropicBackend),
    /// Mock backend for testing and offline use
    Mock(MockBackend),
}

impl AIClient {
    /// Create an AI client from environment variables
    ///
    /// Checks `SPENDCAT_BACKEND` to determine which backend to use:
    /// - `anthropic` (default): requires ANTHROPIC_API_KEY
    /// - `mock`: keyword-driven offline replies
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Same as [`AIClient::from_env`], reading variables through `var`
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let backend = var("SPENDCAT_BACKEND").unwrap_or_else(|| "anthropic".to_string());

        match backend.to_lowercase().as_str() {
            "anthropic" => AnthropicBackend::from_vars(var).map(AIClient::Anthropic),
            "mock" => Ok(AIClient::mock()),
            _ => {
                tracing::warn!(backend = %backend, "Unknown SPENDCAT_BACKEND, falling back to anthropic");
                AnthropicBackend::from_vars(var).map(AIClient::Anthropic)
            }
        }
    }

    /// Create a mock backend for testing
    pub fn mock() -> Self {
        AIClient::Mock(MockBackend::new())
    }

    /// Create a mock backend that always returns `reply`
    pub fn mock_reply(reply: impl Into<String>) -> Self {
        AIClient::Mock(MockBackend::with_reply(reply))
    }
}

#[async_trait]
impl ClassificationBackend for AIClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        match self {
            AIClient::Anthropic(b) => b.complete(prompt).await,
            AIClient::Mock(b) => b.complete(prompt).await,
        }
    }

    fn model(&self) -> &str {
        match self {
            AIClient::Anthropic(b) => b.model(),
            AIClient::Mock(b) => b.model(),
        }
    }

    fn host(&self) -> &str {
        match self {
            AIClient::Anthropic(b) => b.host(),
            AIClient::Mock(b) => b.host(),
        }
    }
}
