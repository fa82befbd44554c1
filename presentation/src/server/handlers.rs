//! HTTP request handlers for the JSON API.

use super::AppState;
use super::error::ApiError;
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use pulse_domain::{
    AnalysisContext, AnalysisRequest, AnalysisResult, NewsContent, Selection, SelectionSuggestion,
    Taxonomy,
};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/select-traits`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectTraitsBody {
    pub news_content: Option<String>,
}

/// Body of `POST /api/generate-report`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateReportBody {
    pub news_content: Option<String>,
    pub selected_traits: Option<Vec<String>>,
    #[serde(default)]
    pub context: Option<AnalysisContext>,
}

#[derive(Debug, Serialize)]
pub struct CategoryListing {
    pub name: &'static str,
    pub title: &'static str,
    pub labels: Vec<String>,
}

/// Response of `GET /api/taxonomy`; also the CLI's JSON taxonomy output.
#[derive(Debug, Serialize)]
pub struct TaxonomyListing {
    pub categories: Vec<CategoryListing>,
}

impl TaxonomyListing {
    pub fn new(taxonomy: &Taxonomy) -> Self {
        let categories = taxonomy
            .iter()
            .map(|(category, labels)| CategoryListing {
                name: category.key(),
                title: category.display_name(),
                labels: labels.to_vec(),
            })
            .collect();
        Self { categories }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub credential_configured: bool,
}

fn required_content(value: Option<String>) -> Result<NewsContent, ApiError> {
    let text = value.ok_or_else(|| ApiError::BadRequest("newsContent is required".to_string()))?;
    Ok(NewsContent::new(text)?)
}

fn ensure_credential(state: &AppState) -> Result<(), ApiError> {
    if state.gateway.has_credential() {
        Ok(())
    } else {
        Err(ApiError::MissingCredential)
    }
}

/// `POST /api/select-traits`
pub async fn select_traits(
    State(state): State<AppState>,
    body: Result<Json<SelectTraitsBody>, JsonRejection>,
) -> Result<Json<SelectionSuggestion>, ApiError> {
    let Json(body) = body?;
    let content = required_content(body.news_content)?;
    ensure_credential(&state)?;

    Ok(Json(state.selector.execute(&content).await))
}

/// `POST /api/generate-report`
pub async fn generate_report(
    State(state): State<AppState>,
    body: Result<Json<GenerateReportBody>, JsonRejection>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let Json(body) = body?;
    let content = required_content(body.news_content)?;
    let labels = body
        .selected_traits
        .ok_or_else(|| ApiError::BadRequest("selectedTraits is required".to_string()))?;
    let selection = Selection::from_labels(&state.taxonomy, &labels)?;
    let request =
        AnalysisRequest::new(content, selection)?.with_context(body.context.unwrap_or_default());
    ensure_credential(&state)?;

    Ok(Json(state.reporter.execute(&request).await))
}

/// `GET /api/taxonomy`
pub async fn taxonomy(State(state): State<AppState>) -> Json<TaxonomyListing> {
    Json(TaxonomyListing::new(&state.taxonomy))
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        credential_configured: state.gateway.has_credential(),
    })
}

/// Fallback for unsupported methods on the pipeline endpoints.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
