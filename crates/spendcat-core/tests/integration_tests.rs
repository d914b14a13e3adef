//! Integration tests for spendcat-core
//!
//! These tests exercise the full template → prompt → classify → ledger flow
//! against the bundled docs/ templates.

use std::path::{Path, PathBuf};

use spendcat_core::{
    AIClient, Categorizer, Config, Error, LedgerRow, PaymentMethod, Transaction,
};

fn docs_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../docs")
}

fn config_in(dir: &Path) -> Config {
    Config {
        categories_path: docs_dir().join("transaction-categories.md"),
        template_path: docs_dir().join("prompt-template.md"),
        ledger_path: dir.join("data").join("transactions.csv"),
    }
}

const DINING_REPLY: &str = r#"<output>{"category":"Dining","confidence":"high","reasoning":"small cash purchase at a coffee vendor"}</output>"#;

// =============================================================================
// Bundled Template Tests
// =============================================================================

#[test]
fn test_bundled_template_builds_complete_prompt() {
    let dir = tempfile::tempdir().unwrap();
    let categorizer = Categorizer::new(config_in(dir.path()), AIClient::mock());
    let tx = Transaction::new("Coffee Shop", "morning coffee", PaymentMethod::Cash, 4.50);

    let prompt = categorizer.prompt_for(&tx).unwrap();
    let categories = std::fs::read_to_string(&categorizer.config().categories_path).unwrap();

    assert!(prompt.contains(&categories));
    assert!(prompt.contains(&serde_json::to_string_pretty(&tx).unwrap()));
    assert!(!prompt.contains("{{CATEGORIES_FILE}}"));
    assert!(!prompt.contains("{{TRANSACTION}}"));
    assert!(!prompt.contains("<prompt-template>"));
}

// =============================================================================
// End-to-End Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_coffee_shop_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let categorizer = Categorizer::new(config_in(dir.path()), AIClient::mock_reply(DINING_REPLY));
    let ledger = categorizer.ledger();

    let tx = Transaction::new("Coffee Shop", "morning coffee", PaymentMethod::Cash, 4.50);
    let result = categorizer.categorize(&tx).await.unwrap();
    ledger.append(&tx, &result).unwrap();

    let rows = ledger.rows().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(
        rows[0],
        LedgerRow {
            date: tx.date.clone(),
            merchant: "Coffee Shop".to_string(),
            description: "morning coffee".to_string(),
            payment_method: "Cash".to_string(),
            amount: 4.5,
            category: "Dining".to_string(),
            confidence: "high".to_string(),
            reasoning: "small cash purchase at a coffee vendor".to_string(),
        }
    );

    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    assert!(rows[0].date.starts_with(&today));
}

#[tokio::test]
async fn test_missing_end_marker_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let reply = r#"<output>{"category":"Dining","confidence":"high","reasoning":"cut off"#;
    let categorizer = Categorizer::new(config_in(dir.path()), AIClient::mock_reply(reply));
    let ledger = categorizer.ledger();

    let tx = Transaction::new("Coffee Shop", "morning coffee", PaymentMethod::Cash, 4.50);
    let err = categorizer.categorize(&tx).await.unwrap_err();

    assert!(matches!(err, Error::MarkerNotFound(ref m) if m == "</output>"));
    assert!(!ledger.path().exists());
}

#[tokio::test]
async fn test_several_transactions_share_one_header() {
    let dir = tempfile::tempdir().unwrap();
    let categorizer = Categorizer::new(config_in(dir.path()), AIClient::mock());
    let ledger = categorizer.ledger();

    let transactions = [
        Transaction::new("Safeway", "groceries, weekly", PaymentMethod::DebitCard, 82.13),
        Transaction::new("Uber", "ride \"home\"", PaymentMethod::CreditCard, 23.0),
        Transaction::new("Refund Desk", "returned item", PaymentMethod::Cash, -15.25),
    ];
    for tx in &transactions {
        let result = categorizer.categorize(tx).await.unwrap();
        ledger.append(tx, &result).unwrap();
    }

    let content = std::fs::read_to_string(ledger.path()).unwrap();
    assert_eq!(
        content
            .lines()
            .filter(|l| *l == "date,merchant,description,payment_method,amount,category,confidence,reasoning")
            .count(),
        1
    );

    let rows = ledger.rows().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].category, "Groceries");
    assert_eq!(rows[1].description, "ride \"home\"");
    assert_eq!(rows[1].category, "Transportation");
    assert_eq!(rows[2].amount, -15.25);
}
