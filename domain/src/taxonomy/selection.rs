//! Selection value object

use super::Taxonomy;
use crate::core::error::DomainError;
use serde::Serialize;

/// A set of taxonomy labels chosen by the user (Value Object)
///
/// Members are canonical taxonomy labels without duplicates; insertion order
/// is kept because prompts list labels in caller order. There is no
/// `Deserialize` impl: the only way in is through the taxonomy-checked
/// constructors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Selection {
    labels: Vec<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a selection from raw labels, rejecting any label that is not in
    /// the taxonomy. Duplicates are collapsed.
    pub fn from_labels<I, S>(taxonomy: &Taxonomy, labels: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut selection = Self::new();
        for label in labels {
            selection.insert(taxonomy, label.as_ref())?;
        }
        Ok(selection)
    }

    /// Add a label. Returns `false` if it was already selected.
    pub fn insert(&mut self, taxonomy: &Taxonomy, label: &str) -> Result<bool, DomainError> {
        let canonical = taxonomy
            .canonical(label)
            .ok_or_else(|| DomainError::UnknownLabel(label.trim().to_string()))?;
        if self.contains(canonical) {
            return Ok(false);
        }
        self.labels.push(canonical.to_string());
        Ok(true)
    }

    /// Remove a label. Returns `false` if it was not selected.
    pub fn remove(&mut self, label: &str) -> bool {
        let label = label.trim();
        let before = self.labels.len();
        self.labels.retain(|l| !l.eq_ignore_ascii_case(label));
        self.labels.len() != before
    }

    /// Flip a label. Returns whether the label is selected afterwards.
    pub fn toggle(&mut self, taxonomy: &Taxonomy, label: &str) -> Result<bool, DomainError> {
        if self.remove(label) {
            return Ok(false);
        }
        self.insert(taxonomy, label)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l.eq_ignore_ascii_case(label.trim()))
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.labels
    }

    /// Labels joined with `", "` in insertion order.
    pub fn joined(&self) -> String {
        self.labels.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn taxonomy() -> std::sync::Arc<Taxonomy> {
        Taxonomy::shared()
    }

    #[test]
    fn test_from_labels_keeps_order_and_dedupes() {
        let selection =
            Selection::from_labels(&taxonomy(), ["technology", "male", "24-30", "male"]).unwrap();
        assert_eq!(selection.as_slice(), ["technology", "male", "24-30"]);
        assert_eq!(selection.joined(), "technology, male, 24-30");
    }

    #[test]
    fn test_from_labels_rejects_unknown() {
        let err = Selection::from_labels(&taxonomy(), ["technology", "astrology"]).unwrap_err();
        assert_eq!(err, DomainError::UnknownLabel("astrology".to_string()));
    }

    #[test]
    fn test_insert_canonicalizes() {
        let mut selection = Selection::new();
        assert!(selection.insert(&taxonomy(), " Technology ").unwrap());
        assert!(!selection.insert(&taxonomy(), "technology").unwrap());
        assert_eq!(selection.as_slice(), ["technology"]);
    }

    #[test]
    fn test_toggle() {
        let mut selection = Selection::new();
        assert!(selection.toggle(&taxonomy(), "female").unwrap());
        assert!(selection.contains("female"));
        assert!(!selection.toggle(&taxonomy(), "female").unwrap());
        assert!(selection.is_empty());
        assert!(selection.toggle(&taxonomy(), "dragon").is_err());
    }

    #[test]
    fn test_serializes_as_array() {
        let selection = Selection::from_labels(&taxonomy(), ["health", "60+"]).unwrap();
        let json = serde_json::to_value(&selection).unwrap();
        assert_eq!(json, serde_json::json!(["health", "60+"]));
    }
}
