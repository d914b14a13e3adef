//! CLI argument definitions using clap
//!
//! With no flags the fixed default locations apply.

use std::path::PathBuf;

use clap::Parser;
use spendcat_core::config::{
    Config, DEFAULT_CATEGORIES_PATH, DEFAULT_LEDGER_PATH, DEFAULT_TEMPLATE_PATH,
};

/// spendcat - Categorize transactions with an LLM and keep a CSV ledger
#[derive(Parser)]
#[command(name = "spendcat")]
#[command(about = "Interactive personal finance transaction categorizer", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Categories reference document
    #[arg(long, default_value = DEFAULT_CATEGORIES_PATH)]
    pub categories: PathBuf,

    /// Prompt template document
    #[arg(long, default_value = DEFAULT_TEMPLATE_PATH)]
    pub template: PathBuf,

    /// Ledger CSV file
    #[arg(long, default_value = DEFAULT_LEDGER_PATH)]
    pub ledger: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn config(&self) -> Config {
        Config {
            categories_path: self.categories.clone(),
            template_path: self.template.clone(),
            ledger_path: self.ledger.clone(),
        }
    }
}
