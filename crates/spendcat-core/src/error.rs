//! Error types for spendcat

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read {}: {source}", .path.display())]
    Template {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Classification API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Marker not found: {0}")]
    MarkerNotFound(String),

    #[error("Marker {end} appears before {start}")]
    MarkersOutOfOrder { start: String, end: String },

    /// Holds the rejected input
    #[error(
        "Invalid payment method. Must be one of: {}",
        crate::models::PaymentMethod::accepted_list()
    )]
    InvalidPaymentMethod(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Missing configuration: {0}")]
    MissingConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
