//! Categorization pipeline
//!
//! Ties the template files, the classification backend and the reply parser
//! together. One call makes exactly one backend request.

use tracing::debug;

use crate::ai::{parsing::parse_categorization, AIClient, ClassificationBackend};
use crate::config::Config;
use crate::error::Result;
use crate::ledger::Ledger;
use crate::models::{Categorization, Transaction};
use crate::prompts::{build_prompt, extract_template_body, load_templates};

/// Session context: configuration plus the classification client
#[derive(Clone)]
pub struct Categorizer {
    config: Config,
    client: AIClient,
}

impl Categorizer {
    pub fn new(config: Config, client: AIClient) -> Self {
        Self { config, client }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Ledger at the configured path
    pub fn ledger(&self) -> Ledger {
        Ledger::new(&self.config.ledger_path)
    }

    /// Build the prompt for `transaction` from freshly loaded templates
    pub fn prompt_for(&self, transaction: &Transaction) -> Result<String> {
        let templates = load_templates(&self.config)?;
        let body = extract_template_body(&templates.prompt_template)?;
        build_prompt(body, &templates.categories, transaction)
    }

    /// Classify one transaction
    pub async fn categorize(&self, transaction: &Transaction) -> Result<Categorization> {
        let prompt = self.prompt_for(transaction)?;

        debug!(
            model = %self.client.model(),
            host = %self.client.host(),
            merchant = %transaction.merchant,
            "Categorizing transaction"
        );

        let reply = self.client.complete(&prompt).await?;
        parse_categorization(&reply)
    }
}
