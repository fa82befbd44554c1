//! Suggested selection produced by the selector flow

use super::selection::Selection;
use super::{Category, Taxonomy};
use serde::{Deserialize, Serialize};

/// Per-category label suggestion (Value Object)
///
/// Field names match the wire format of the selector endpoint. A suggestion
/// that came out of [`sanitize`](Self::sanitize) only holds labels that exist
/// in their own category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionSuggestion {
    pub ages: Vec<String>,
    pub genders: Vec<String>,
    pub personality_traits: Vec<String>,
    pub interests: Vec<String>,
}

impl SelectionSuggestion {
    pub fn labels(&self, category: Category) -> &[String] {
        match category {
            Category::Ages => &self.ages,
            Category::Genders => &self.genders,
            Category::PersonalityTraits => &self.personality_traits,
            Category::Interests => &self.interests,
        }
    }

    pub fn labels_mut(&mut self, category: Category) -> &mut Vec<String> {
        match category {
            Category::Ages => &mut self.ages,
            Category::Genders => &mut self.genders,
            Category::PersonalityTraits => &mut self.personality_traits,
            Category::Interests => &mut self.interests,
        }
    }

    /// Iterate `(category, labels)` in presentation order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[String])> + '_ {
        Category::ALL.into_iter().map(|c| (c, self.labels(c)))
    }

    /// Total number of suggested labels.
    pub fn len(&self) -> usize {
        Category::ALL.iter().map(|c| self.labels(*c).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keep only labels that belong to their category, in canonical
    /// spelling and without duplicates.
    ///
    /// Returns the cleaned suggestion together with the labels that were
    /// dropped, so callers can log what the model made up.
    pub fn sanitize(&self, taxonomy: &Taxonomy) -> (SelectionSuggestion, Vec<String>) {
        let mut clean = SelectionSuggestion::default();
        let mut dropped = Vec::new();

        for (category, labels) in self.iter() {
            let target = clean.labels_mut(category);
            for label in labels {
                match taxonomy.canonical_in(category, label) {
                    Some(canonical) => {
                        if !target.iter().any(|l| l == canonical) {
                            target.push(canonical.to_string());
                        }
                    }
                    None => dropped.push(label.clone()),
                }
            }
        }

        (clean, dropped)
    }

    /// Flatten into a [`Selection`] (category order, then label order).
    ///
    /// Labels unknown to `taxonomy` are skipped, so this never fails.
    pub fn to_selection(&self, taxonomy: &Taxonomy) -> Selection {
        let mut selection = Selection::new();
        for (_, labels) in self.iter() {
            for label in labels {
                let _ = selection.insert(taxonomy, label);
            }
        }
        selection
    }
}
