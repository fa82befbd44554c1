//! Domain layer for audience-pulse
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Taxonomy and Selection
//!
//! - **Taxonomy**: the fixed catalog of audience characteristics in four
//!   categories (age, gender, personality, interests)
//! - **Selection**: the user-confirmed set of taxonomy labels
//! - **SelectionSuggestion**: per-category labels proposed by the model,
//!   always sanitized against the taxonomy
//!
//! ## Analysis
//!
//! - **AnalysisRequest**: content plus a non-empty selection
//! - **AnalysisResult**: the report, produced by the model or by the static
//!   fallback

pub mod analysis;
pub mod config;
pub mod core;
pub mod prompt;
pub mod session;
pub mod taxonomy;
pub mod util;

// Re-export commonly used types
pub use analysis::{
    AnalysisContext, AnalysisRequest, AnalysisResult, ReportSource,
    fallback::{FALLBACK_REPORT, default_suggestion},
};
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use core::{content::NewsContent, error::DomainError, model::Model};
pub use prompt::{PromptTemplate, REPORT_SECTIONS};
pub use session::entities::SessionState;
pub use taxonomy::{
    Category, Taxonomy,
    parsing::{SuggestionParseError, parse_suggestion, strip_code_fence},
    selection::Selection,
    suggestion::SelectionSuggestion,
};
