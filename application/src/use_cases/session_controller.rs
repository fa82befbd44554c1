//! Analysis session controller.
//!
//! Owns one user's [`SessionState`] and runs the selector and report
//! pipelines on its behalf. A new request supersedes the one in flight: the
//! older call is cancelled and, should its result still arrive, it is
//! discarded by the generation check.

use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::use_cases::generate_report::GenerateReportUseCase;
use crate::use_cases::select_characteristics::SelectCharacteristicsUseCase;
use pulse_domain::{
    AnalysisContext, AnalysisRequest, AnalysisResult, DomainError, NewsContent,
    SelectionSuggestion, SessionState, Taxonomy,
};
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Errors raised by the session controller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("No content has been analyzed yet")]
    NoContent,
}

/// Session state plus the token of the request in flight.
///
/// Both live under one lock so that bumping the generation and swapping the
/// token are a single step.
#[derive(Default)]
struct Slot {
    state: SessionState,
    in_flight: Option<CancellationToken>,
}

/// Controller for one analysis session.
pub struct AnalysisSessionController {
    selector: SelectCharacteristicsUseCase,
    reporter: GenerateReportUseCase,
    taxonomy: Arc<Taxonomy>,
    slot: Mutex<Slot>,
}

impl AnalysisSessionController {
    pub fn new(selector: SelectCharacteristicsUseCase, reporter: GenerateReportUseCase) -> Self {
        let taxonomy = selector.taxonomy().clone();
        Self {
            selector,
            reporter,
            taxonomy,
            slot: Mutex::new(Slot::default()),
        }
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// Clone of the current state.
    pub fn snapshot(&self) -> SessionState {
        self.lock().state.clone()
    }

    /// Analyze `text` and pre-select the suggested labels.
    ///
    /// Returns `Ok(None)` when a newer request superseded this one.
    pub async fn suggest(&self, text: &str) -> Result<Option<SelectionSuggestion>, SessionError> {
        self.suggest_with_progress(text, &NoProgress).await
    }

    pub async fn suggest_with_progress(
        &self,
        text: &str,
        progress: &dyn ProgressNotifier,
    ) -> Result<Option<SelectionSuggestion>, SessionError> {
        let content = NewsContent::new(text)?;
        let (generation, token) = self.begin_request();

        let suggestion = match self
            .selector
            .execute_cancellable(&content, progress, &token)
            .await
        {
            Ok(suggestion) => suggestion,
            Err(e) if e.is_cancelled() => {
                debug!(generation, "Suggestion superseded");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let mut slot = self.lock();
        if !slot.state.is_current(generation) {
            debug!(generation, "Discarding stale suggestion");
            return Ok(None);
        }
        let selection = suggestion.to_selection(&self.taxonomy);
        info!(labels = selection.len(), "Suggestion applied");
        slot.state.apply_suggestion(content, suggestion.clone(), selection);
        slot.in_flight = None;
        Ok(Some(suggestion))
    }

    /// Add a label. Returns `false` if it was already selected.
    pub fn select(&self, label: &str) -> Result<bool, SessionError> {
        Ok(self.lock().state.selection.insert(&self.taxonomy, label)?)
    }

    /// Remove a label. Returns `false` if it was not selected.
    pub fn deselect(&self, label: &str) -> Result<bool, SessionError> {
        if !self.taxonomy.is_known(label) {
            return Err(DomainError::UnknownLabel(label.trim().to_string()).into());
        }
        Ok(self.lock().state.selection.remove(label))
    }

    /// Flip a label. Returns whether it is selected afterwards.
    pub fn toggle(&self, label: &str) -> Result<bool, SessionError> {
        Ok(self.lock().state.selection.toggle(&self.taxonomy, label)?)
    }

    /// Generate the report for the current content and selection.
    ///
    /// Returns `Ok(None)` when a newer request superseded this one.
    pub async fn report(
        &self,
        context: AnalysisContext,
    ) -> Result<Option<AnalysisResult>, SessionError> {
        self.report_with_progress(context, &NoProgress).await
    }

    pub async fn report_with_progress(
        &self,
        context: AnalysisContext,
        progress: &dyn ProgressNotifier,
    ) -> Result<Option<AnalysisResult>, SessionError> {
        let request = {
            let slot = self.lock();
            let content = slot.state.content.clone().ok_or(SessionError::NoContent)?;
            AnalysisRequest::new(content, slot.state.selection.clone())?.with_context(context)
        };
        let (generation, token) = self.begin_request();

        let result = match self
            .reporter
            .execute_cancellable(&request, progress, &token)
            .await
        {
            Ok(result) => result,
            Err(e) if e.is_cancelled() => {
                debug!(generation, "Report superseded");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let mut slot = self.lock();
        if !slot.state.is_current(generation) {
            debug!(generation, "Discarding stale report");
            return Ok(None);
        }
        slot.state.apply_report(result.clone());
        slot.in_flight = None;
        Ok(Some(result))
    }

    /// Cancel the request in flight, if any.
    pub fn cancel(&self) {
        if let Some(token) = self.lock().in_flight.take() {
            debug!("Cancelling request in flight");
            token.cancel();
        }
    }

    /// Bump the generation and swap in a fresh token, cancelling the old one.
    ///
    /// The newest generation always owns the stored token.
    fn begin_request(&self) -> (u64, CancellationToken) {
        let mut slot = self.lock();
        let generation = slot.state.begin_request();
        let token = CancellationToken::new();
        if let Some(previous) = slot.in_flight.replace(token.clone()) {
            previous.cancel();
        }
        (generation, token)
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        // Only mutated under short, panic-free sections
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
