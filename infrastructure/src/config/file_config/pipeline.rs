//! Inference configuration from TOML (`[selector]` and `[report]` sections)

use pulse_application::InferenceParams;
use pulse_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// Allowed sampling temperature range (inclusive).
const TEMPERATURE_RANGE: std::ops::RangeInclusive<f32> = 0.0..=2.0;

/// `[selector]` section: the characteristic selection call
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSelectorConfig {
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for FileSelectorConfig {
    fn default() -> Self {
        let params = InferenceParams::selector_default();
        Self {
            max_tokens: params.max_tokens,
            temperature: params.temperature,
        }
    }
}

impl FileSelectorConfig {
    pub fn to_params(self) -> InferenceParams {
        InferenceParams::new(self.max_tokens, self.temperature)
    }

    pub(crate) fn validate(&self) -> Vec<ConfigIssue> {
        validate_inference("selector", self.max_tokens, self.temperature)
    }
}

/// `[report]` section: the report generation call
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReportConfig {
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for FileReportConfig {
    fn default() -> Self {
        let params = InferenceParams::report_default();
        Self {
            max_tokens: params.max_tokens,
            temperature: params.temperature,
        }
    }
}

impl FileReportConfig {
    pub fn to_params(self) -> InferenceParams {
        InferenceParams::new(self.max_tokens, self.temperature)
    }

    pub(crate) fn validate(&self) -> Vec<ConfigIssue> {
        validate_inference("report", self.max_tokens, self.temperature)
    }
}

fn validate_inference(section: &str, max_tokens: u32, temperature: f32) -> Vec<ConfigIssue> {
    let mut issues = Vec::new();

    if max_tokens == 0 {
        issues.push(ConfigIssue::error(
            ConfigIssueCode::ZeroValue {
                field: format!("{}.max_tokens", section),
            },
            format!("{}.max_tokens: token budget cannot be 0", section),
        ));
    }

    if !TEMPERATURE_RANGE.contains(&temperature) {
        issues.push(ConfigIssue::error(
            ConfigIssueCode::OutOfRange {
                field: format!("{}.temperature", section),
                value: temperature.to_string(),
            },
            format!("{}.temperature: {} is outside 0.0-2.0", section, temperature),
        ));
    }

    issues
}
