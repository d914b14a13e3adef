//! Parsing helpers for classification replies
//!
//! The model is asked to wrap its JSON answer in `<output>` tags; anything
//! outside that region (reasoning, preamble) is ignored.

use crate::error::Result;
use crate::models::Categorization;
use crate::prompts::extract_between;

pub const OUTPUT_START: &str = "<output>";
pub const OUTPUT_END: &str = "</output>";

/// Extract and parse the `<output>` region of a model reply
pub fn parse_categorization(reply: &str) -> Result<Categorization> {
    let json_str = extract_between(reply, OUTPUT_START, OUTPUT_END)?;
    Ok(serde_json::from_str(json_str)?)
}
