//! Append-only CSV ledger of categorized transactions
//!
//! Each call opens the file, appends one row and closes it again. The header
//! is written only when the file did not exist before the call.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::models::{Categorization, Transaction};

/// Column order of the ledger file
pub const LEDGER_HEADER: [&str; 8] = [
    "date",
    "merchant",
    "description",
    "payment_method",
    "amount",
    "category",
    "confidence",
    "reasoning",
];

/// One flattened ledger record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerRow {
    pub date: String,
    pub merchant: String,
    pub description: String,
    pub payment_method: String,
    pub amount: f64,
    pub category: String,
    pub confidence: String,
    pub reasoning: String,
}

impl LedgerRow {
    pub fn new(transaction: &Transaction, categorization: &Categorization) -> Self {
        Self {
            date: transaction.date.clone(),
            merchant: transaction.merchant.clone(),
            description: transaction.description.clone(),
            payment_method: transaction.payment_method.to_string(),
            amount: transaction.amount,
            category: categorization.category.clone(),
            confidence: categorization.confidence.clone(),
            reasoning: categorization.reasoning.clone(),
        }
    }
}

/// Ledger file handle (path only; no file is held open)
#[derive(Debug, Clone)]
pub struct Ledger {
    path: PathBuf,
}

impl Ledger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one categorized transaction
    pub fn append(&self, transaction: &Transaction, categorization: &Categorization) -> Result<()> {
        let exists = self.path.exists();

        if !exists {
            if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if !exists {
            writer.write_record(LEDGER_HEADER)?;
        }
        writer.serialize(LedgerRow::new(transaction, categorization))?;
        writer.flush()?;

        info!(
            path = %self.path.display(),
            category = %categorization.category,
            "Appended ledger row"
        );

        Ok(())
    }

    /// Read every row back from the ledger
    pub fn rows(&self) -> Result<Vec<LedgerRow>> {
        let mut reader = csv::Reader::from_path(&self.path)?;
        let rows = reader
            .deserialize()
            .collect::<std::result::Result<Vec<LedgerRow>, csv::Error>>()?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaymentMethod;

    fn sample_transaction(merchant: &str, description: &str) -> Transaction {
        Transaction::with_date(
            merchant,
            description,
            PaymentMethod::CreditCard,
            -12.75,
            "2024-03-01 08:15:00",
        )
    }

    fn sample_categorization(reasoning: &str) -> Categorization {
        Categorization {
            category: "Shopping".to_string(),
            confidence: "medium".to_string(),
            reasoning: reasoning.to_string(),
        }
    }

    #[test]
    fn test_append_creates_file_with_header() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = Ledger::new(dir.path().join("data").join("transactions.csv"));

        ledger
            .append(&sample_transaction("Store", "stuff"), &sample_categorization("ok"))
            .unwrap();

        let content = fs::read_to_string(ledger.path()).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next().unwrap(), LEDGER_HEADER.join(","));
        assert_eq!(
            lines.next().unwrap(),
            "2024-03-01 08:15:00,Store,stuff,Credit Card,-12.75,Shopping,medium,ok"
        );
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_header_matches_row_fields() {
        // `rows` reads by header name, so the two must stay in step
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plain.csv");
        let mut writer = csv::Writer::from_path(&path).unwrap();
        writer
            .serialize(LedgerRow::new(
                &sample_transaction("Store", "stuff"),
                &sample_categorization("ok"),
            ))
            .unwrap();
        writer.flush().unwrap();
        drop(writer);

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().next().unwrap(), LEDGER_HEADER.join(","));
    }

    #[test]
    fn test_header_written_once() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = Ledger::new(dir.path().join("transactions.csv"));

        for i in 0..5 {
            ledger
                .append(
                    &sample_transaction(&format!("Store {}", i), "stuff"),
                    &sample_categorization("ok"),
                )
                .unwrap();
        }

        let content = fs::read_to_string(ledger.path()).unwrap();
        assert_eq!(content.matches("date,merchant").count(), 1);
        assert_eq!(ledger.rows().unwrap().len(), 5);
    }

    #[test]
    fn test_append_never_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transactions.csv");
        let existing = format!(
            "{}\n2023-01-01 00:00:00,Old,old row,Cash,1.0,Other,low,kept\n",
            LEDGER_HEADER.join(",")
        );
        fs::write(&path, &existing).unwrap();

        let ledger = Ledger::new(&path);
        ledger
            .append(&sample_transaction("New", "new row"), &sample_categorization("added"))
            .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with(&existing));
        let rows = ledger.rows().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].merchant, "Old");
        assert_eq!(rows[1].merchant, "New");
    }

    #[test]
    fn test_round_trip_special_characters() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = Ledger::new(dir.path().join("transactions.csv"));

        let tx = sample_transaction("Joe's \"Best\" Tacos, Inc.", "lunch,\nwith team\r\nand \"friends\"");
        let cat = sample_categorization("taco place, \"obviously\"\nrestaurant");
        ledger.append(&tx, &cat).unwrap();

        let rows = ledger.rows().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0], LedgerRow::new(&tx, &cat));
        assert_eq!(rows[0].description, "lunch,\nwith team\r\nand \"friends\"");
    }

    #[test]
    fn test_rows_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = Ledger::new(dir.path().join("missing.csv"));
        assert!(ledger.rows().is_err());
    }
}
