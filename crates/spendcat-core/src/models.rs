//! Domain models for spendcat

use chrono::Local;
use serde::{de, Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};

/// Timestamp format stamped on every transaction
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Payment method used for a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "Credit Card")]
    CreditCard,
    #[serde(rename = "Debit Card")]
    DebitCard,
    #[serde(rename = "Cash")]
    Cash,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreditCard => "Credit Card",
            Self::DebitCard => "Debit Card",
            Self::Cash => "Cash",
        }
    }

    /// All accepted payment methods, in prompt order
    pub fn all() -> &'static [PaymentMethod] {
        &[Self::CreditCard, Self::DebitCard, Self::Cash]
    }

    /// Comma-separated list shown to the user
    pub fn accepted_list() -> String {
        Self::all()
            .iter()
            .map(|m| m.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Exact, case-sensitive match against the accepted names
impl std::str::FromStr for PaymentMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| Error::InvalidPaymentMethod(s.to_string()))
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse a user-entered amount as a floating-point number
///
/// Accepts any float literal Rust understands (sign, decimals, exponent),
/// plus single `_` separators between digits (`1_000.50`).
pub fn parse_amount(input: &str) -> Result<f64> {
    let trimmed = input.trim();
    strip_digit_separators(trimmed)
        .and_then(|s| s.parse::<f64>().ok())
        .ok_or_else(|| Error::InvalidAmount(trimmed.to_string()))
}

/// Drop `_` that sit between two digits; `None` for any other `_`
fn strip_digit_separators(input: &str) -> Option<String> {
    let bytes = input.as_bytes();
    let mut out = String::with_capacity(input.len());

    for (i, c) in input.char_indices() {
        if c != '_' {
            out.push(c);
            continue;
        }
        let before = i > 0 && bytes[i - 1].is_ascii_digit();
        let after = bytes.get(i + 1).is_some_and(|b| b.is_ascii_digit());
        if !(before && after) {
            return None;
        }
    }

    Some(out)
}

/// A single user-reported purchase or payment
///
/// Field order here is the key order of the JSON embedded in the prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub merchant: String,
    pub description: String,
    pub payment_method: PaymentMethod,
    pub amount: f64,
    pub date: String,
}

impl Transaction {
    /// Create a transaction stamped with the current local time
    pub fn new(
        merchant: impl Into<String>,
        description: impl Into<String>,
        payment_method: PaymentMethod,
        amount: f64,
    ) -> Self {
        let date = Local::now().format(DATE_FORMAT).to_string();
        Self::with_date(merchant, description, payment_method, amount, date)
    }

    /// Create a transaction with an explicit timestamp
    pub fn with_date(
        merchant: impl Into<String>,
        description: impl Into<String>,
        payment_method: PaymentMethod,
        amount: f64,
        date: impl Into<String>,
    ) -> Self {
        Self {
            merchant: merchant.into(),
            description: description.into(),
            payment_method,
            amount,
            date: date.into(),
        }
    }
}

/// Category assigned by the classification model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Categorization {
    pub category: String,
    /// Producer-defined label; numbers are kept in their JSON rendering
    #[serde(deserialize_with = "string_or_number")]
    pub confidence: String,
    pub reasoning: String,
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!(
            "expected string or number for confidence, got {}",
            other
        ))),
    }
}
