//! Prompt construction from the on-disk template
//!
//! The template file carries its prompt inside a `<prompt-template>` region.
//! Two placeholders in that region are replaced verbatim:
//! - `{{CATEGORIES_FILE}}` with the categories reference text
//! - `{{TRANSACTION}}` with the transaction as pretty-printed JSON
//!
//! Both files are read on every call so edits take effect immediately.

use std::fs;
use std::path::Path;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::Transaction;

pub const TEMPLATE_START: &str = "<prompt-template>";
pub const TEMPLATE_END: &str = "</prompt-template>";
pub const CATEGORIES_PLACEHOLDER: &str = "{{CATEGORIES_FILE}}";
pub const TRANSACTION_PLACEHOLDER: &str = "{{TRANSACTION}}";

/// Raw contents of the two template documents
#[derive(Debug, Clone)]
pub struct Templates {
    pub categories: String,
    pub prompt_template: String,
}

/// Read the categories and prompt-template files
pub fn load_templates(config: &Config) -> Result<Templates> {
    Ok(Templates {
        categories: read_template(&config.categories_path)?,
        prompt_template: read_template(&config.template_path)?,
    })
}

fn read_template(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::Template {
        path: path.to_path_buf(),
        source,
    })
}

/// Return the trimmed text between the first `start` and the first `end`
///
/// Both markers are searched from the beginning of `text`. A missing marker,
/// or an end marker that closes before the start marker does, is an error.
pub fn extract_between<'a>(text: &'a str, start: &str, end: &str) -> Result<&'a str> {
    let start_idx = text
        .find(start)
        .ok_or_else(|| Error::MarkerNotFound(start.to_string()))?;
    let end_idx = text
        .find(end)
        .ok_or_else(|| Error::MarkerNotFound(end.to_string()))?;

    let body_start = start_idx + start.len();
    if end_idx < body_start {
        return Err(Error::MarkersOutOfOrder {
            start: start.to_string(),
            end: end.to_string(),
        });
    }

    Ok(text[body_start..end_idx].trim())
}

/// Extract the prompt body from a raw template document
pub fn extract_template_body(raw: &str) -> Result<&str> {
    extract_between(raw, TEMPLATE_START, TEMPLATE_END)
}

/// Substitute the categories text and transaction JSON into a template body
///
/// Substitution is literal replace-all. Missing placeholders are left alone.
pub fn build_prompt(template: &str, categories: &str, transaction: &Transaction) -> Result<String> {
    let transaction_json = serde_json::to_string_pretty(transaction)?;
    let prompt = template
        .replace(CATEGORIES_PLACEHOLDER, categories)
        .replace(TRANSACTION_PLACEHOLDER, &transaction_json);
    Ok(prompt)
}
