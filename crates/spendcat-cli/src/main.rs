//! spendcat CLI - Interactive transaction categorizer
//!
//! Usage:
//!   spendcat                          Use docs/ templates and data/transactions.csv
//!   spendcat --ledger other.csv       Write to a different ledger
//!
//! Credentials come from the environment or a `.env` file
//! (`ANTHROPIC_API_KEY`; `SPENDCAT_BACKEND=mock` for offline use).

mod cli;
mod session;


use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;
use spendcat_core::{AIClient, Categorizer};
use tokio::io::BufReader;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::Cli;
use session::{Session, SessionEnd};

const FAREWELL: &str = "\n\nGoodbye!";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    dotenv::dotenv().ok();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (warn)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    let client = AIClient::from_env().context("Failed to configure classification backend")?;
    let categorizer = Categorizer::new(cli.config(), client);

    let mut session = Session::new(
        categorizer,
        BufReader::new(tokio::io::stdin()),
        std::io::stdout(),
    );

    tokio::select! {
        end = session.run() => {
            if end.context("Console I/O failed")? == SessionEnd::InputClosed {
                println!("{}", FAREWELL);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            println!("{}", FAREWELL);
            std::io::stdout().flush().ok();
            // A pending stdin read would otherwise hold the runtime open
            std::process::exit(0);
        }
    }

    Ok(())
}
