//! Parsing of the selector model's structured reply.
//!
//! The reply must be a JSON object keyed by category. Parsing is strict about
//! the overall shape (anything that is not a JSON object is rejected) and
//! lenient inside it:
//!
//! | Input | Result |
//! |-------|--------|
//! | Missing category key | empty list for that category |
//! | Category value not an array | empty list for that category |
//! | Non-string array item | item dropped |
//! | Unknown extra keys | ignored |
//! | Truncated JSON, prose, arrays, scalars | [`SuggestionParseError`] |
//!
//! Whether the labels belong to the taxonomy is checked separately by
//! [`SelectionSuggestion::sanitize`].

use super::Category;
use super::suggestion::SelectionSuggestion;
use serde_json::Value;
use thiserror::Error;

/// Why a selector reply could not be read.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SuggestionParseError {
    #[error("Response was empty")]
    Empty,

    #[error("Response is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("Response JSON is not an object")]
    NotAnObject,
}

/// Remove a surrounding markdown code fence (```` ``` ```` or ```` ```json ````).
///
/// Text without a fence is returned trimmed and otherwise unchanged.
pub fn strip_code_fence(text: &str) -> &str {
    let mut body = text.trim();
    if let Some(rest) = body.strip_prefix("```") {
        // Drop an optional language tag on the opening line
        body = match rest.find('\n') {
            Some(newline) if !rest[..newline].trim().contains(' ') => &rest[newline + 1..],
            _ => rest,
        };
        body = body.trim_end();
        if let Some(inner) = body.strip_suffix("```") {
            body = inner;
        }
    }
    body.trim()
}

/// Parse a selector reply into an (unsanitized) suggestion.
pub fn parse_suggestion(text: &str) -> Result<SelectionSuggestion, SuggestionParseError> {
    let body = strip_code_fence(text);
    if body.is_empty() {
        return Err(SuggestionParseError::Empty);
    }

    let value: Value = serde_json::from_str(body)
        .map_err(|e| SuggestionParseError::InvalidJson(e.to_string()))?;

    let Value::Object(map) = value else {
        return Err(SuggestionParseError::NotAnObject);
    };

    let mut suggestion = SelectionSuggestion::default();
    for category in Category::ALL {
        if let Some(Value::Array(items)) = map.get(category.key()) {
            suggestion.labels_mut(category).extend(
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string),
            );
        }
    }

    Ok(suggestion)
}
