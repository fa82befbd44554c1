//! Shared utilities for use cases.
//!
//! Contains the deadline, retry and cancellation policy wrapped around every
//! inference call made by the selector and report pipelines.

use crate::config::PipelineParams;
use crate::ports::llm_gateway::{CompletionRequest, GatewayError, LlmGateway};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Pause before retry number `attempt` (1-based).
fn retry_backoff(attempt: u32) -> Duration {
    Duration::from_millis(250 * u64::from(attempt))
}

/// Send one completion request under the pipeline policy.
///
/// - every attempt runs under `params.deadline`
/// - transient failures are retried up to `params.transient_retries` times
/// - the call resolves to [`GatewayError::Cancelled`] as soon as `token` fires
pub(crate) async fn complete_with_policy(
    gateway: &dyn LlmGateway,
    request: &CompletionRequest,
    params: &PipelineParams,
    token: &CancellationToken,
) -> Result<String, GatewayError> {
    request.validate()?;

    let mut attempt = 0;
    loop {
        if token.is_cancelled() {
            return Err(GatewayError::Cancelled);
        }

        let result = tokio::select! {
            biased;
            _ = token.cancelled() => Err(GatewayError::Cancelled),
            outcome = tokio::time::timeout(params.deadline, gateway.complete(request)) => {
                outcome.unwrap_or(Err(GatewayError::Timeout))
            }
        };

        match result {
            Err(e) if e.is_transient() && attempt < params.transient_retries => {
                attempt += 1;
                warn!(
                    error = %e,
                    attempt,
                    max = params.transient_retries,
                    "Transient inference failure, retrying"
                );
                tokio::select! {
                    biased;
                    _ = token.cancelled() => return Err(GatewayError::Cancelled),
                    _ = tokio::time::sleep(retry_backoff(attempt)) => {}
                }
            }
            other => {
                if attempt > 0 {
                    debug!(attempts = attempt + 1, ok = other.is_ok(), "Retry loop finished");
                }
                return other;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::ScriptedGateway;
    use pulse_domain::Model;

    fn request() -> CompletionRequest {
        CompletionRequest::new(Model::Gpt4o, "hello")
    }

    #[tokio::test]
    async fn test_success_passes_through() {
        let gateway = ScriptedGateway::new(vec![Ok("hi".to_string())]);
        let result = complete_with_policy(
            &gateway,
            &request(),
            &PipelineParams::default(),
            &CancellationToken::new(),
        )
        .await;
        assert_eq!(result.unwrap(), "hi");
        assert_eq!(gateway.calls(), 1);
    }

    #[tokio::test]
    async fn test_no_retry_by_default() {
        let gateway = ScriptedGateway::new(vec![
            Err(GatewayError::Transport("reset".into())),
            Ok("late".to_string()),
        ]);
        let result = complete_with_policy(
            &gateway,
            &request(),
            &PipelineParams::default(),
            &CancellationToken::new(),
        )
        .await;
        assert!(matches!(result, Err(GatewayError::Transport(_))));
        assert_eq!(gateway.calls(), 1);
    }

    #[tokio::test]
    async fn test_transient_retry() {
        let gateway = ScriptedGateway::new(vec![
            Err(GatewayError::Status {
                status: 503,
                body: "busy".into(),
            }),
            Ok("second".to_string()),
        ]);
        let params = PipelineParams::default().with_transient_retries(1);
        let result =
            complete_with_policy(&gateway, &request(), &params, &CancellationToken::new()).await;
        assert_eq!(result.unwrap(), "second");
        assert_eq!(gateway.calls(), 2);
    }

    #[tokio::test]
    async fn test_permanent_error_not_retried() {
        let gateway = ScriptedGateway::new(vec![
            Err(GatewayError::Status {
                status: 401,
                body: "bad key".into(),
            }),
            Ok("never".to_string()),
        ]);
        let params = PipelineParams::default().with_transient_retries(3);
        let result =
            complete_with_policy(&gateway, &request(), &params, &CancellationToken::new()).await;
        assert!(matches!(result, Err(GatewayError::Status { status: 401, .. })));
        assert_eq!(gateway.calls(), 1);
    }

    #[tokio::test]
    async fn test_deadline_enforced() {
        let gateway = ScriptedGateway::new(vec![Ok("slow".to_string())])
            .with_delay(Duration::from_secs(5));
        let params = PipelineParams::default().with_deadline(Duration::from_millis(50));
        let result =
            complete_with_policy(&gateway, &request(), &params, &CancellationToken::new()).await;
        assert_eq!(result, Err(GatewayError::Timeout));
    }

    #[tokio::test]
    async fn test_cancelled_token_short_circuits() {
        let gateway = ScriptedGateway::new(vec![Ok("unused".to_string())]);
        let token = CancellationToken::new();
        token.cancel();
        let result =
            complete_with_policy(&gateway, &request(), &PipelineParams::default(), &token).await;
        assert_eq!(result, Err(GatewayError::Cancelled));
        assert_eq!(gateway.calls(), 0);
    }

    #[tokio::test]
    async fn test_invalid_request_never_sent() {
        let gateway = ScriptedGateway::new(vec![Ok("unused".to_string())]);
        let empty = CompletionRequest::new(Model::Gpt4o, "");
        let result = complete_with_policy(
            &gateway,
            &empty,
            &PipelineParams::default(),
            &CancellationToken::new(),
        )
        .await;
        assert!(matches!(result, Err(GatewayError::InvalidRequest(_))));
        assert_eq!(gateway.calls(), 0);
    }
}
