//! Runtime configuration
//!
//! Built once at startup and passed into the categorizer and ledger.

use std::path::PathBuf;

/// Default categories reference document
pub const DEFAULT_CATEGORIES_PATH: &str = "docs/transaction-categories.md";
/// Default prompt template document
pub const DEFAULT_TEMPLATE_PATH: &str = "docs/prompt-template.md";
/// Default ledger location
pub const DEFAULT_LEDGER_PATH: &str = "data/transactions.csv";

/// File locations used by one session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub categories_path: PathBuf,
    pub template_path: PathBuf,
    pub ledger_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            categories_path: PathBuf::from(DEFAULT_CATEGORIES_PATH),
            template_path: PathBuf::from(DEFAULT_TEMPLATE_PATH),
            ledger_path: PathBuf::from(DEFAULT_LEDGER_PATH),
        }
    }
}
