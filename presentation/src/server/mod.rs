//! HTTP JSON API.
//!
//! Exposes the selector and report pipelines to a browser front end:
//!
//! | Route | Method | Purpose |
//! |-------|--------|---------|
//! | `/api/select-traits` | POST | Suggest characteristics for content |
//! | `/api/generate-report` | POST | Generate the audience report |
//! | `/api/taxonomy` | GET | List selectable characteristics |
//! | `/health` | GET | Liveness and credential status |

mod error;
mod handlers;
mod routes;

pub use error::ApiError;
pub use handlers::TaxonomyListing;
pub use routes::create_router;

use pulse_application::{GenerateReportUseCase, LlmGateway, SelectCharacteristicsUseCase};
use pulse_domain::Taxonomy;
use std::sync::Arc;

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub selector: SelectCharacteristicsUseCase,
    pub reporter: GenerateReportUseCase,
    pub taxonomy: Arc<Taxonomy>,
    pub gateway: Arc<dyn LlmGateway>,
}

impl AppState {
    pub fn new(
        gateway: Arc<dyn LlmGateway>,
        selector: SelectCharacteristicsUseCase,
        reporter: GenerateReportUseCase,
    ) -> Self {
        Self {
            taxonomy: selector.taxonomy().clone(),
            selector,
            reporter,
            gateway,
        }
    }
}

/// Start the web server and run until Ctrl-C.
pub async fn serve(state: AppState, addr: &str) -> std::io::Result<()> {
    if !state.gateway.has_credential() {
        tracing::warn!("No API credential configured; pipeline endpoints will return 500");
    }
    tracing::warn!(
        "Every pipeline request makes one upstream inference call; there is no rate limiting or request queueing"
    );

    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Starting server at http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down");
        })
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use pulse_application::{CompletionRequest, GatewayError, PipelineParams};
    use pulse_domain::FALLBACK_REPORT;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tower::ServiceExt;

    /// Returns canned replies in order, then fails.
    struct CannedGateway {
        replies: Mutex<Vec<Result<String, GatewayError>>>,
        calls: AtomicUsize,
        credential: bool,
    }

    impl CannedGateway {
        fn new(replies: Vec<Result<String, GatewayError>>) -> Self {
            Self {
                replies: Mutex::new(replies.into_iter().rev().collect()),
                calls: AtomicUsize::new(0),
                credential: true,
            }
        }
    }

    #[async_trait]
    impl LlmGateway for CannedGateway {
        fn has_credential(&self) -> bool {
            self.credential
        }

        async fn complete(&self, _request: &CompletionRequest) -> Result<String, GatewayError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.replies
                .lock()
                .unwrap()
                .pop()
                .unwrap_or(Err(GatewayError::Transport("no reply".into())))
        }
    }

    fn app(gateway: Arc<CannedGateway>) -> axum::Router {
        let params = PipelineParams::default();
        let selector =
            SelectCharacteristicsUseCase::new(gateway.clone(), Taxonomy::shared(), params.clone());
        let reporter = GenerateReportUseCase::new(gateway.clone(), params);
        create_router(AppState::new(gateway, selector, reporter))
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_select_traits_returns_suggestion() {
        let gateway = Arc::new(CannedGateway::new(vec![Ok(
            r#"{"ages":["24-30"],"genders":["female"],"personality_traits":[],"interests":["technology","unicorns"]}"#.to_string(),
        )]));
        let response = app(gateway)
            .oneshot(post_json(
                "/api/select-traits",
                r#"{"newsContent": "New phone launches"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["ages"][0], "24-30");
        assert_eq!(json["genders"][0], "female");
        assert_eq!(json["personality_traits"].as_array().unwrap().len(), 0);
        assert_eq!(json["interests"], serde_json::json!(["technology"]));
    }

    #[tokio::test]
    async fn test_select_traits_falls_back_on_failure() {
        let gateway = Arc::new(CannedGateway::new(vec![Err(GatewayError::Timeout)]));
        let response = app(gateway)
            .oneshot(post_json("/api/select-traits", r#"{"newsContent": "x"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["ages"], serde_json::json!(["24-30", "31-40"]));
        assert_eq!(json["interests"], serde_json::json!(["technology"]));
    }

    #[tokio::test]
    async fn test_select_traits_rejects_blank_content() {
        let gateway = Arc::new(CannedGateway::new(vec![]));
        for body in [r#"{"newsContent": "   "}"#, r#"{}"#] {
            let response = app(gateway.clone())
                .oneshot(post_json("/api/select-traits", body))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert!(json_body(response).await["error"].is_string());
        }
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let gateway = Arc::new(CannedGateway::new(vec![]));
        let response = app(gateway)
            .oneshot(post_json("/api/select-traits", "{not json"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(json_body(response).await["error"].is_string());
    }

    #[tokio::test]
    async fn test_get_on_pipeline_endpoint_is_405() {
        let gateway = Arc::new(CannedGateway::new(vec![]));
        let response = app(gateway)
            .oneshot(
                Request::builder()
                    .uri("/api/generate-report")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(json_body(response).await["error"], "Method not allowed");
    }

    #[tokio::test]
    async fn test_missing_credential_is_500() {
        let mut gateway = CannedGateway::new(vec![]);
        gateway.credential = false;
        let gateway = Arc::new(gateway);
        let response = app(gateway.clone())
            .oneshot(post_json("/api/select-traits", r#"{"newsContent": "x"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(json_body(response).await["error"].is_string());
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_generate_report() {
        let gateway = Arc::new(CannedGateway::new(vec![Ok(
            "<h3>Overall Reaction</h3><p>Skeptical.</p>".to_string(),
        )]));
        let response = app(gateway)
            .oneshot(post_json(
                "/api/generate-report",
                r#"{"newsContent": "Company X raises prices", "selectedTraits": ["technology", "male", "24-30"], "context": {"channel": "email"}}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["source"], "model");
        assert_eq!(json["report"], "<h3>Overall Reaction</h3><p>Skeptical.</p>");
    }

    #[tokio::test]
    async fn test_generate_report_fallback() {
        let gateway = Arc::new(CannedGateway::new(vec![Err(GatewayError::Status {
            status: 502,
            body: "bad gateway".into(),
        })]));
        let response = app(gateway)
            .oneshot(post_json(
                "/api/generate-report",
                r#"{"newsContent": "Rates rise", "selectedTraits": ["finance"]}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["source"], "fallback");
        assert_eq!(json["report"], FALLBACK_REPORT);
    }

    #[tokio::test]
    async fn test_generate_report_input_errors() {
        let cases = [
            r#"{"newsContent": "Rates rise", "selectedTraits": []}"#,
            r#"{"newsContent": "Rates rise", "selectedTraits": ["astronauts"]}"#,
            r#"{"newsContent": "Rates rise"}"#,
            r#"{"selectedTraits": ["finance"]}"#,
        ];
        let gateway = Arc::new(CannedGateway::new(vec![]));
        for body in cases {
            let response = app(gateway.clone())
                .oneshot(post_json("/api/generate-report", body))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
        }
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_taxonomy_listing() {
        let gateway = Arc::new(CannedGateway::new(vec![]));
        let response = app(gateway)
            .oneshot(
                Request::builder()
                    .uri("/api/taxonomy")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        let categories = json["categories"].as_array().unwrap();
        assert_eq!(categories.len(), 4);
        assert_eq!(categories[0]["name"], "ages");
        assert!(
            categories[3]["labels"]
                .as_array()
                .unwrap()
                .contains(&serde_json::json!("technology"))
        );
    }

    #[tokio::test]
    async fn test_health_reports_credential() {
        let gateway = Arc::new(CannedGateway::new(vec![]));
        let response = app(gateway)
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let json = json_body(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["credential_configured"], true);
    }
}
