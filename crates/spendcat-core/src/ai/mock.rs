//! Mock backend for testing
//!
//! Produces replies in the same `<output>{...}</output>` shape the real model
//! is asked for. Useful for unit tests and for running the CLI offline.

use async_trait::async_trait;

use crate::error::Result;

use super::ClassificationBackend;

/// Mock classification backend
///
/// Without a fixed reply, the category is guessed from keywords in the prompt.
#[derive(Clone, Default)]
pub struct MockBackend {
    reply: Option<String>,
}

impl MockBackend {
    /// Create a keyword-driven mock backend
    pub fn new() -> Self {
        Self { reply: None }
    }

    /// Create a mock backend that always returns `reply` verbatim
    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
        }
    }
}

#[async_trait]
impl ClassificationBackend for MockBackend {
    async fn complete(&self, prompt: &str) -> Result<String> {
        if let Some(ref reply) = self.reply {
            return Ok(reply.clone());
        }

        let text = transaction_lines(prompt).to_uppercase();
        let (category, reasoning) = match text.as_str() {
            t if t.contains("COFFEE") || t.contains("RESTAURANT") || t.contains("STARBUCKS") => {
                ("Dining", "food or drink vendor")
            }
            t if t.contains("GROCER") || t.contains("WHOLE FOODS") || t.contains("SAFEWAY") => {
                ("Groceries", "grocery store purchase")
            }
            t if t.contains("UBER") || t.contains("GAS") || t.contains("SHELL") => {
                ("Transportation", "travel or fuel expense")
            }
            t if t.contains("NETFLIX") || t.contains("SPOTIFY") => {
                ("Entertainment", "streaming subscription")
            }
            _ => ("Other", "no matching keywords"),
        };

        let body = serde_json::json!({
            "category": category,
            "confidence": "low",
            "reasoning": format!("mock: {}", reasoning),
        });
        Ok(format!("<output>\n{}\n</output>", body))
    }

    fn model(&self) -> &str {
        "mock"
    }

    fn host(&self) -> &str {
        "mock://localhost"
    }
}

/// Merchant and description lines of the embedded transaction JSON
///
/// Keeps category names in the reference text from skewing the guess.
/// Falls back to the whole prompt when no such lines exist.
fn transaction_lines(prompt: &str) -> String {
    let lines: Vec<&str> = prompt
        .lines()
        .filter(|l| {
            let l = l.trim_start();
            l.starts_with("\"merchant\":") || l.starts_with("\"description\":")
        })
        .collect();

    if lines.is_empty() {
        prompt.to_string()
    } else {
        lines.join("\n")
    }
}
