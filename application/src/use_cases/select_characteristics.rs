//! Select Characteristics use case.
//!
//! Turns free text into a [`SelectionSuggestion`] drawn from the taxonomy.
//! The pipeline never fails: any inference or parse problem yields the
//! fixed default suggestion.

use crate::config::PipelineParams;
use crate::ports::conversation_logger::{NoPipelineLogger, PipelineEvent, PipelineLogger};
use crate::ports::llm_gateway::{CompletionRequest, GatewayError, LlmGateway};
use crate::ports::progress::{NoProgress, PipelineStage, ProgressNotifier};
use crate::use_cases::shared::complete_with_policy;
use pulse_domain::util::preview;
use pulse_domain::{
    DomainError, NewsContent, PromptTemplate, SelectionSuggestion, Taxonomy, default_suggestion,
    parse_suggestion,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Use case for suggesting audience characteristics.
///
/// 1. Build the classification prompt from the taxonomy and the content
/// 2. One inference call (low temperature, small budget)
/// 3. Strict parse of the JSON reply
/// 4. Sanitize against the taxonomy; fall back to the default suggestion
#[derive(Clone)]
pub struct SelectCharacteristicsUseCase {
    gateway: Arc<dyn LlmGateway>,
    taxonomy: Arc<Taxonomy>,
    params: PipelineParams,
    logger: Arc<dyn PipelineLogger>,
}

impl SelectCharacteristicsUseCase {
    pub fn new(
        gateway: Arc<dyn LlmGateway>,
        taxonomy: Arc<Taxonomy>,
        params: PipelineParams,
    ) -> Self {
        Self {
            gateway,
            taxonomy,
            params,
            logger: Arc::new(NoPipelineLogger),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn PipelineLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn taxonomy(&self) -> &Arc<Taxonomy> {
        &self.taxonomy
    }

    /// Suggest characteristics for `content`.
    pub async fn execute(&self, content: &NewsContent) -> SelectionSuggestion {
        self.execute_with_progress(content, &NoProgress).await
    }

    pub async fn execute_with_progress(
        &self,
        content: &NewsContent,
        progress: &dyn ProgressNotifier,
    ) -> SelectionSuggestion {
        // A fresh token is never cancelled
        match self
            .execute_cancellable(content, progress, &CancellationToken::new())
            .await
        {
            Ok(suggestion) => suggestion,
            Err(_) => default_suggestion(),
        }
    }

    /// Like [`execute`](Self::execute), but returns
    /// [`DomainError::Cancelled`] if `token` fires before the reply arrives.
    pub async fn execute_cancellable(
        &self,
        content: &NewsContent,
        progress: &dyn ProgressNotifier,
        token: &CancellationToken,
    ) -> Result<SelectionSuggestion, DomainError> {
        let prompt = PromptTemplate::selection_prompt(&self.taxonomy, content);
        let request = CompletionRequest::new(self.params.model.clone(), prompt)
            .with_max_tokens(self.params.selector.max_tokens)
            .with_temperature(self.params.selector.temperature);

        progress.on_stage_start(PipelineStage::Selection);
        info!(model = %self.params.model, bytes = content.as_str().len(), "Selecting characteristics");

        let reply = match complete_with_policy(
            self.gateway.as_ref(),
            &request,
            &self.params,
            token,
        )
        .await
        {
            Ok(text) => Some(text),
            Err(GatewayError::Cancelled) => {
                debug!("Selection cancelled");
                return Err(DomainError::Cancelled);
            }
            Err(e) => {
                warn!(error = %e, "Selection call failed, using default suggestion");
                None
            }
        };

        let (suggestion, used_fallback) = match reply {
            Some(text) => self.interpret(&text),
            None => (default_suggestion(), true),
        };

        self.logger.log(PipelineEvent::new(
            "selection_suggested",
            serde_json::json!({
                "model": self.params.model.as_str(),
                "content_preview": preview(content.as_str(), 120),
                "fallback": used_fallback,
                "suggestion": &suggestion,
            }),
        ));
        progress.on_stage_complete(PipelineStage::Selection, used_fallback);

        Ok(suggestion)
    }

    /// Parse and sanitize a reply. Returns the suggestion and whether the
    /// default had to be used.
    fn interpret(&self, text: &str) -> (SelectionSuggestion, bool) {
        let parsed = match parse_suggestion(text) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(
                    error = %e,
                    reply = %preview(text, 200),
                    "Unparsable selection reply, using default suggestion"
                );
                return (default_suggestion(), true);
            }
        };

        let (clean, dropped) = parsed.sanitize(&self.taxonomy);
        if !dropped.is_empty() {
            debug!(?dropped, "Dropped labels outside the taxonomy");
        }

        if clean.is_empty() {
            warn!("Selection reply had no usable labels, using default suggestion");
            return (default_suggestion(), true);
        }

        debug!(labels = clean.len(), "Selection parsed");
        (clean, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::ScriptedGateway;
    use serde_json::Value;
    use std::sync::Mutex;

    fn content(text: &str) -> NewsContent {
        NewsContent::new(text).unwrap()
    }

    fn use_case(gateway: Arc<ScriptedGateway>) -> SelectCharacteristicsUseCase {
        SelectCharacteristicsUseCase::new(gateway, Taxonomy::shared(), PipelineParams::default())
    }

    struct RecordingLogger {
        events: Mutex<Vec<(&'static str, Value)>>,
    }

    impl PipelineLogger for RecordingLogger {
        fn log(&self, event: PipelineEvent) {
            self.events
                .lock()
                .unwrap()
                .push((event.event_type, event.payload));
        }
    }

    #[tokio::test]
    async fn test_valid_reply_is_used() {
        let gateway = Arc::new(ScriptedGateway::new(vec![Ok(
            r#"{"ages":["18-23"],"genders":["female"],"personality_traits":["extraversion"],"interests":["sports","food"]}"#
                .to_string(),
        )]));
        let suggestion = use_case(gateway.clone())
            .execute(&content("Local team wins the cup"))
            .await;

        assert_eq!(suggestion.ages, ["18-23"]);
        assert_eq!(suggestion.genders, ["female"]);
        assert_eq!(suggestion.personality_traits, ["extraversion"]);
        assert_eq!(suggestion.interests, ["sports", "food"]);

        let requests = gateway.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].max_tokens, 500);
        assert!((requests[0].temperature - 0.3).abs() < f32::EPSILON);
        assert!(requests[0].prompt.contains("Local team wins the cup"));
    }

    #[tokio::test]
    async fn test_unknown_labels_dropped() {
        let gateway = Arc::new(ScriptedGateway::new(vec![Ok(
            r#"{"ages":["24-30","99-100"],"genders":["robot"],"interests":["Technology","technology","knitting"]}"#
                .to_string(),
        )]));
        let suggestion = use_case(gateway).execute(&content("Chip prices fall")).await;

        assert_eq!(suggestion.ages, ["24-30"]);
        assert!(suggestion.genders.is_empty());
        assert_eq!(suggestion.interests, ["technology"]);

        let taxonomy = Taxonomy::shared();
        for (category, labels) in suggestion.iter() {
            for label in labels {
                assert!(taxonomy.contains(category, label));
            }
        }
    }

    #[tokio::test]
    async fn test_gateway_failure_yields_default() {
        let gateway = Arc::new(ScriptedGateway::failing(
            GatewayError::Status {
                status: 500,
                body: "oops".into(),
            },
            2,
        ));
        let use_case = use_case(gateway);
        let first = use_case.execute(&content("anything")).await;
        let second = use_case.execute(&content("anything")).await;
        assert_eq!(first, default_suggestion());
        assert_eq!(second, default_suggestion());
    }

    #[tokio::test]
    async fn test_never_fails_on_bad_replies() {
        let replies = [
            "{}",
            r#"{"ages": ["24-30", "#,
            r#"{"ages": "24-30", "extra": true}"#,
            "I think the audience is young men.",
            "[]",
            "",
        ];
        for reply in replies {
            let gateway = Arc::new(ScriptedGateway::new(vec![Ok(reply.to_string())]));
            let suggestion = use_case(gateway).execute(&content("Rates rise")).await;
            assert_eq!(suggestion, default_suggestion(), "reply: {reply:?}");
        }
    }

    #[tokio::test]
    async fn test_fenced_reply_accepted() {
        let gateway = Arc::new(ScriptedGateway::new(vec![Ok(
            "```json\n{\"interests\": [\"health\"]}\n```".to_string(),
        )]));
        let suggestion = use_case(gateway).execute(&content("New clinic opens")).await;
        assert_eq!(suggestion.interests, ["health"]);
        assert!(suggestion.ages.is_empty());
    }

    #[tokio::test]
    async fn test_cancellation_reported() {
        let gateway = Arc::new(ScriptedGateway::new(vec![Ok("{}".to_string())]));
        let token = CancellationToken::new();
        token.cancel();
        let result = use_case(gateway)
            .execute_cancellable(&content("x"), &NoProgress, &token)
            .await;
        assert_eq!(result, Err(DomainError::Cancelled));
    }

    #[tokio::test]
    async fn test_event_logged() {
        let gateway = Arc::new(ScriptedGateway::failing(GatewayError::Timeout, 1));
        let logger = Arc::new(RecordingLogger {
            events: Mutex::new(Vec::new()),
        });
        use_case(gateway)
            .with_logger(logger.clone())
            .execute(&content("Rates rise"))
            .await;

        let events = logger.events.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].0, "selection_suggested");
        assert_eq!(events[0].1["fallback"], Value::Bool(true));
        assert_eq!(events[0].1["suggestion"]["interests"][0], "technology");
    }
}
