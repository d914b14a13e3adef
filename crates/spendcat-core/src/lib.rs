//! spendcat Core Library
//!
//! Shared functionality for the spendcat transaction categorizer:
//! - Transaction and categorization models
//! - Prompt construction from on-disk templates
//! - Pluggable classification backends (Messages API, mock)
//! - Extraction of the model's `<output>` block
//! - Append-only CSV ledger

pub mod ai;
pub mod config;
pub mod error;
pub mod ledger;
pub mod models;
pub mod pipeline;
pub mod prompts;

/// Test utilities including a mock Messages API server
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use ai::{AIClient, AnthropicBackend, ClassificationBackend, MockBackend};
pub use config::Config;
pub use error::{Error, Result};
pub use ledger::{Ledger, LedgerRow};
pub use models::{parse_amount, Categorization, PaymentMethod, Transaction};
pub use pipeline::Categorizer;
