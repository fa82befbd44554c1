//! News content value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// The free text submitted for analysis (Value Object)
///
/// Always trimmed and never empty. Building one is the input check that
/// happens before any inference call is made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NewsContent {
    text: String,
}

impl NewsContent {
    /// Create new content, rejecting empty or whitespace-only text.
    pub fn new(text: impl Into<String>) -> Result<Self, DomainError> {
        let text = text.into();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyContent);
        }
        Ok(Self {
            text: trimmed.to_string(),
        })
    }

    /// Get the content text
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Consume and return the inner text
    pub fn into_inner(self) -> String {
        self.text
    }
}

impl std::fmt::Display for NewsContent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl TryFrom<String> for NewsContent {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        NewsContent::new(s)
    }
}

impl From<NewsContent> for String {
    fn from(content: NewsContent) -> Self {
        content.text
    }
}
