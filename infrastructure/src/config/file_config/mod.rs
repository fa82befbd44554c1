//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod logging;
mod output;
mod pipeline;
mod provider;
mod server;

pub use logging::FileLoggingConfig;
pub use output::FileOutputConfig;
pub use pipeline::{FileReportConfig, FileSelectorConfig};
pub use provider::FileProviderConfig;
pub use server::FileServerConfig;

use crate::openai::OpenAiConfig;
use pulse_application::PipelineParams;
use pulse_domain::ConfigIssue;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration that failed validation.
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("invalid configuration: {}", summarize(.0))]
    Invalid(Vec<ConfigIssue>),
}

fn summarize(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .filter(|i| i.severity == pulse_domain::Severity::Error)
        .map(|i| i.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Chat-completion provider
    pub provider: FileProviderConfig,
    /// Characteristic selection call
    pub selector: FileSelectorConfig,
    /// Report generation call
    pub report: FileReportConfig,
    /// HTTP server
    pub server: FileServerConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Log destinations
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        issues.extend(self.provider.validate());
        issues.extend(self.selector.validate());
        issues.extend(self.report.validate());
        issues
    }

    /// Validate and fail on any error-level issue. Warnings are returned.
    pub fn check(&self) -> Result<Vec<ConfigIssue>, ConfigValidationError> {
        let issues = self.validate();
        if ConfigIssue::has_errors(&issues) {
            return Err(ConfigValidationError::Invalid(issues));
        }
        Ok(issues)
    }

    /// Parameters for the selector and report use cases.
    pub fn to_pipeline_params(&self) -> PipelineParams {
        PipelineParams::default()
            .with_model(self.provider.model())
            .with_selector(self.selector.to_params())
            .with_report(self.report.to_params())
            .with_deadline(self.provider.timeout())
            .with_transient_retries(self.provider.transient_retries)
    }

    /// Gateway settings, with the API key resolved from config or env.
    pub fn to_openai_config(&self) -> OpenAiConfig {
        OpenAiConfig {
            base_url: self.provider.base_url.trim().to_string(),
            api_key: self.provider.resolve_api_key(),
            timeout: self.provider.timeout(),
        }
    }
}
