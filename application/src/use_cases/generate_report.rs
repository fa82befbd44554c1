//! Generate Report use case.
//!
//! Produces the audience-reaction report for a validated
//! [`AnalysisRequest`]. Any failure, or a blank reply, yields the static
//! fallback report.

use crate::config::PipelineParams;
use crate::ports::conversation_logger::{NoPipelineLogger, PipelineEvent, PipelineLogger};
use crate::ports::llm_gateway::{CompletionRequest, GatewayError, LlmGateway};
use crate::ports::progress::{NoProgress, PipelineStage, ProgressNotifier};
use crate::use_cases::shared::complete_with_policy;
use pulse_domain::util::preview;
use pulse_domain::{AnalysisRequest, AnalysisResult, DomainError, PromptTemplate, strip_code_fence};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Use case for generating the analysis report.
#[derive(Clone)]
pub struct GenerateReportUseCase {
    gateway: Arc<dyn LlmGateway>,
    params: PipelineParams,
    logger: Arc<dyn PipelineLogger>,
}

impl GenerateReportUseCase {
    pub fn new(gateway: Arc<dyn LlmGateway>, params: PipelineParams) -> Self {
        Self {
            gateway,
            params,
            logger: Arc::new(NoPipelineLogger),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn PipelineLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub async fn execute(&self, request: &AnalysisRequest) -> AnalysisResult {
        self.execute_with_progress(request, &NoProgress).await
    }

    pub async fn execute_with_progress(
        &self,
        request: &AnalysisRequest,
        progress: &dyn ProgressNotifier,
    ) -> AnalysisResult {
        self.execute_cancellable(request, progress, &CancellationToken::new())
            .await
            .unwrap_or_else(|_| AnalysisResult::fallback())
    }

    /// Like [`execute`](Self::execute), but returns
    /// [`DomainError::Cancelled`] if `token` fires first.
    pub async fn execute_cancellable(
        &self,
        request: &AnalysisRequest,
        progress: &dyn ProgressNotifier,
        token: &CancellationToken,
    ) -> Result<AnalysisResult, DomainError> {
        let prompt = PromptTemplate::report_prompt(request);
        let completion = CompletionRequest::new(self.params.model.clone(), prompt)
            .with_max_tokens(self.params.report.max_tokens)
            .with_temperature(self.params.report.temperature);

        progress.on_stage_start(PipelineStage::Report);
        info!(
            model = %self.params.model,
            labels = request.selection().len(),
            "Generating report"
        );

        let result = match complete_with_policy(
            self.gateway.as_ref(),
            &completion,
            &self.params,
            token,
        )
        .await
        {
            Ok(text) => {
                // Models sometimes wrap HTML in a ```html fence
                let body = strip_code_fence(&text);
                if body.is_empty() {
                    warn!("Report reply was blank, using fallback report");
                    AnalysisResult::fallback()
                } else {
                    debug!(bytes = body.len(), "Report generated");
                    AnalysisResult::from_model(body)
                }
            }
            Err(GatewayError::Cancelled) => {
                debug!("Report cancelled");
                return Err(DomainError::Cancelled);
            }
            Err(e) => {
                warn!(error = %e, "Report call failed, using fallback report");
                AnalysisResult::fallback()
            }
        };

        self.logger.log(PipelineEvent::new(
            "report_generated",
            serde_json::json!({
                "model": self.params.model.as_str(),
                "content_preview": preview(request.content().as_str(), 120),
                "selection": request.selection(),
                "source": result.source(),
                "bytes": result.report().len(),
            }),
        ));
        progress.on_stage_complete(PipelineStage::Report, result.is_fallback());

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::ScriptedGateway;
    use pulse_domain::{FALLBACK_REPORT, NewsContent, ReportSource, Selection, Taxonomy};

    fn request(labels: &[&str]) -> AnalysisRequest {
        let taxonomy = Taxonomy::shared();
        AnalysisRequest::new(
            NewsContent::new("Company X raises prices").unwrap(),
            Selection::from_labels(&taxonomy, labels.iter().copied()).unwrap(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_model_report_returned() {
        let gateway = Arc::new(ScriptedGateway::new(vec![Ok(
            "<h3>Overall Reaction</h3><p>Mixed.</p>".to_string(),
        )]));
        let use_case = GenerateReportUseCase::new(gateway.clone(), PipelineParams::default());
        let result = use_case
            .execute(&request(&["technology", "male", "24-30"]))
            .await;

        assert_eq!(result.source(), ReportSource::Model);
        assert_eq!(result.report(), "<h3>Overall Reaction</h3><p>Mixed.</p>");

        let sent = &gateway.requests()[0];
        assert_eq!(sent.max_tokens, 2000);
        assert!((sent.temperature - 0.7).abs() < f32::EPSILON);
        assert!(sent.prompt.contains("technology, male, 24-30"));
        assert!(sent.prompt.contains("Company X raises prices"));
        assert!(!sent.prompt.contains("{}"));
    }

    #[tokio::test]
    async fn test_failure_yields_exact_fallback() {
        let gateway = Arc::new(ScriptedGateway::failing(
            GatewayError::Transport("connection refused".into()),
            2,
        ));
        let use_case = GenerateReportUseCase::new(gateway, PipelineParams::default());
        let first = use_case.execute(&request(&["finance"])).await;
        let second = use_case.execute(&request(&["finance"])).await;
        assert!(first.is_fallback());
        assert_eq!(first.report(), FALLBACK_REPORT);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_blank_reply_yields_fallback() {
        let gateway = Arc::new(ScriptedGateway::new(vec![Ok("   \n ".to_string())]));
        let use_case = GenerateReportUseCase::new(gateway, PipelineParams::default());
        let result = use_case.execute(&request(&["food"])).await;
        assert!(result.is_fallback());
    }

    #[tokio::test]
    async fn test_html_fence_stripped() {
        let gateway = Arc::new(ScriptedGateway::new(vec![Ok(
            "```html\n<p>ok</p>\n```".to_string(),
        )]));
        let use_case = GenerateReportUseCase::new(gateway, PipelineParams::default());
        let result = use_case.execute(&request(&["food"])).await;
        assert_eq!(result.report(), "<p>ok</p>");
    }

    #[tokio::test]
    async fn test_missing_credential_yields_fallback() {
        let gateway = Arc::new(
            ScriptedGateway::failing(GatewayError::MissingCredential, 1).without_credential(),
        );
        let use_case = GenerateReportUseCase::new(gateway, PipelineParams::default());
        assert!(use_case.execute(&request(&["travel"])).await.is_fallback());
    }

    #[tokio::test]
    async fn test_suggested_labels_accepted_by_report() {
        let taxonomy = Taxonomy::shared();
        let selection = pulse_domain::default_suggestion().to_selection(&taxonomy);
        let request =
            AnalysisRequest::new(NewsContent::new("Rates rise").unwrap(), selection).unwrap();
        let gateway = Arc::new(ScriptedGateway::new(vec![Ok("<p>r</p>".to_string())]));
        let result = GenerateReportUseCase::new(gateway.clone(), PipelineParams::default())
            .execute(&request)
            .await;
        assert!(!result.is_fallback());
        assert!(gateway.requests()[0].prompt.contains(
            "24-30, 31-40, male, female, openness, conscientiousness, technology"
        ));
    }
}
