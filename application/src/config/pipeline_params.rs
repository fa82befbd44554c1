//! Pipeline parameters: inference and deadline control.
//!
//! [`PipelineParams`] groups the static parameters used by
//! [`SelectCharacteristicsUseCase`](crate::use_cases::select_characteristics::SelectCharacteristicsUseCase)
//! and [`GenerateReportUseCase`](crate::use_cases::generate_report::GenerateReportUseCase).
//! These are application-layer concerns, not domain policy.

use pulse_domain::Model;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Sampling parameters for one kind of inference call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InferenceParams {
    /// Upper bound on generated tokens.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
}

impl InferenceParams {
    pub fn new(max_tokens: u32, temperature: f32) -> Self {
        Self {
            max_tokens,
            temperature,
        }
    }

    /// Low temperature and a small budget: the reply is a short JSON object.
    pub fn selector_default() -> Self {
        Self::new(500, 0.3)
    }

    /// Higher temperature and a larger budget for the narrative report.
    pub fn report_default() -> Self {
        Self::new(2000, 0.7)
    }
}

/// Pipeline control parameters.
///
/// | Field | Default |
/// |-------|---------|
/// | `model` | gpt-4o |
/// | `selector` | 500 tokens, temperature 0.3 |
/// | `report` | 2000 tokens, temperature 0.7 |
/// | `deadline` | 60s per attempt |
/// | `transient_retries` | 0 |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineParams {
    /// Model used for both calls.
    pub model: Model,
    /// Parameters of the characteristic selection call.
    pub selector: InferenceParams,
    /// Parameters of the report call.
    pub report: InferenceParams,
    /// Deadline applied to every attempt.
    pub deadline: Duration,
    /// Extra attempts made after a transient failure.
    pub transient_retries: u32,
}

impl Default for PipelineParams {
    fn default() -> Self {
        Self {
            model: Model::default(),
            selector: InferenceParams::selector_default(),
            report: InferenceParams::report_default(),
            deadline: Duration::from_secs(60),
            transient_retries: 0,
        }
    }
}

impl PipelineParams {
    // ==================== Builder Methods ====================

    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    pub fn with_selector(mut self, params: InferenceParams) -> Self {
        self.selector = params;
        self
    }

    pub fn with_report(mut self, params: InferenceParams) -> Self {
        self.report = params;
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn with_transient_retries(mut self, retries: u32) -> Self {
        self.transient_retries = retries;
        self
    }
}
