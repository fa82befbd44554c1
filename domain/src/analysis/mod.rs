//! Report analysis domain.
//!
//! - [`AnalysisRequest`]: validated input of one report generation
//! - [`AnalysisContext`]: optional campaign metadata for the prompt
//! - [`AnalysisResult`]: the produced report and where it came from
//! - [`fallback`]: static results used when the model is unavailable

pub mod fallback;

use crate::core::content::NewsContent;
use crate::core::error::DomainError;
use crate::taxonomy::selection::Selection;
use serde::{Deserialize, Serialize};

/// Optional campaign metadata that sharpens the analysis prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalysisContext {
    /// What the message is meant to achieve (e.g. "product launch").
    pub goal: Option<String>,
    /// Where it will be published (e.g. "instagram", "press release").
    pub channel: Option<String>,
    /// Intended tone (e.g. "reassuring").
    pub tone: Option<String>,
    /// Kind of organization sending the message.
    pub company_type: Option<String>,
    /// Size of that organization (e.g. "startup", "enterprise").
    pub company_size: Option<String>,
    /// Expected reach (e.g. "10k followers").
    pub audience_size: Option<String>,
    /// Brand background the audience already knows.
    pub brand_context: Option<String>,
    /// Kind of campaign (e.g. "product launch", "crisis response").
    pub campaign_type: Option<String>,
    /// Outcome the sender hopes for (e.g. "sign-ups").
    pub target_outcome: Option<String>,
}

impl AnalysisContext {
    /// `(label, value)` pairs for every non-blank field, in a fixed order.
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        [
            ("Campaign goal", &self.goal),
            ("Channel", &self.channel),
            ("Desired tone", &self.tone),
            ("Company type", &self.company_type),
            ("Company size", &self.company_size),
            ("Audience size", &self.audience_size),
            ("Brand context", &self.brand_context),
            ("Campaign type", &self.campaign_type),
            ("Target outcome", &self.target_outcome),
        ]
        .into_iter()
        .filter_map(|(label, value)| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(|v| (label, v))
        })
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

/// Input of one report generation (Value Object)
///
/// Content is non-empty by construction of [`NewsContent`]; the selection
/// must hold at least one label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    content: NewsContent,
    selection: Selection,
    context: AnalysisContext,
}

impl AnalysisRequest {
    pub fn new(content: NewsContent, selection: Selection) -> Result<Self, DomainError> {
        if selection.is_empty() {
            return Err(DomainError::EmptySelection);
        }
        Ok(Self {
            content,
            selection,
            context: AnalysisContext::default(),
        })
    }

    pub fn with_context(mut self, context: AnalysisContext) -> Self {
        self.context = context;
        self
    }

    pub fn content(&self) -> &NewsContent {
        &self.content
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn context(&self) -> &AnalysisContext {
        &self.context
    }
}

/// Where a report came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportSource {
    /// Generated by the language model.
    Model,
    /// The static fallback report.
    Fallback,
}

/// A finished report (immutable once produced).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    report: String,
    source: ReportSource,
}

impl AnalysisResult {
    /// Wrap model output.
    pub fn from_model(report: impl Into<String>) -> Self {
        Self {
            report: report.into(),
            source: ReportSource::Model,
        }
    }

    /// The static fallback report.
    pub fn fallback() -> Self {
        Self {
            report: fallback::FALLBACK_REPORT.to_string(),
            source: ReportSource::Fallback,
        }
    }

    pub fn report(&self) -> &str {
        &self.report
    }

    pub fn source(&self) -> ReportSource {
        self.source
    }

    pub fn is_fallback(&self) -> bool {
        self.source == ReportSource::Fallback
    }
}
