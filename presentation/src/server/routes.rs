//! Router configuration for the HTTP API.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::AppState;
use super::handlers;

/// Create the router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/taxonomy", get(handlers::taxonomy))
        // Pipeline endpoints answer every other method with a JSON 405
        .route(
            "/api/select-traits",
            post(handlers::select_traits).fallback(handlers::method_not_allowed),
        )
        .route(
            "/api/generate-report",
            post(handlers::generate_report).fallback(handlers::method_not_allowed),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
