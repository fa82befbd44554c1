//! Session domain entities

use crate::analysis::AnalysisResult;
use crate::core::content::NewsContent;
use crate::taxonomy::selection::Selection;
use crate::taxonomy::suggestion::SelectionSuggestion;

/// State of one user's analysis session (Entity)
///
/// Holds what the user is currently working on. `generation` increases with
/// every pipeline request so that a result belonging to a superseded request
/// can be recognized and discarded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub content: Option<NewsContent>,
    pub suggestion: Option<SelectionSuggestion>,
    pub selection: Selection,
    pub report: Option<AnalysisResult>,
    pub generation: u64,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request, returning its generation number.
    pub fn begin_request(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Whether `generation` still identifies the newest request.
    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Apply a selector result: new content, suggestion pre-selected, any
    /// previous report cleared.
    pub fn apply_suggestion(
        &mut self,
        content: NewsContent,
        suggestion: SelectionSuggestion,
        selection: Selection,
    ) {
        self.content = Some(content);
        self.suggestion = Some(suggestion);
        self.selection = selection;
        self.report = None;
    }

    pub fn apply_report(&mut self, report: AnalysisResult) {
        self.report = Some(report);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::Taxonomy;

    #[test]
    fn test_generation_tracking() {
        let mut state = SessionState::new();
        let first = state.begin_request();
        let second = state.begin_request();
        assert!(!state.is_current(first));
        assert!(state.is_current(second));
    }

    #[test]
    fn test_apply_suggestion_clears_report() {
        let taxonomy = Taxonomy::shared();
        let mut state = SessionState::new();
        state.apply_report(AnalysisResult::fallback());

        let suggestion = crate::analysis::fallback::default_suggestion();
        let selection = suggestion.to_selection(&taxonomy);
        state.apply_suggestion(
            NewsContent::new("Rates rise").unwrap(),
            suggestion.clone(),
            selection.clone(),
        );

        assert!(state.report.is_none());
        assert_eq!(state.suggestion, Some(suggestion));
        assert_eq!(state.selection, selection);
        assert_eq!(state.content.as_ref().map(|c| c.as_str()), Some("Rates rise"));
    }
}
