//! Provider configuration from TOML (`[provider]` section)

use pulse_domain::{ConfigIssue, ConfigIssueCode, Model};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// OpenAI-compatible provider configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Base URL of the chat-completion API.
    pub base_url: String,
    /// Environment variable holding the API key (default: "OPENAI_API_KEY").
    pub api_key_env: String,
    /// Direct API key (not recommended, use the env var instead).
    pub api_key: Option<String>,
    /// Model name sent with every request.
    pub model: String,
    /// HTTP timeout and per-attempt deadline, in seconds.
    pub timeout_secs: u64,
    /// Extra attempts after a transient failure.
    pub transient_retries: u32,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            api_key: None,
            model: Model::default().to_string(),
            timeout_secs: 60,
            transient_retries: 0,
        }
    }
}

impl FileProviderConfig {
    pub fn model(&self) -> Model {
        Model::from(self.model.trim())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Resolve the API key: the explicit `api_key` wins, then the variable
    /// named by `api_key_env`. Blank values count as absent.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.resolve_api_key_with(|name| std::env::var(name).ok())
    }

    pub(crate) fn resolve_api_key_with(
        &self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Option<String> {
        let non_blank = |value: String| {
            let trimmed = value.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        };

        if let Some(key) = self.api_key.clone().and_then(non_blank) {
            return Some(key);
        }
        let var = self.api_key_env.trim();
        if var.is_empty() {
            return None;
        }
        lookup(var).and_then(non_blank)
    }

    pub(crate) fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.model.trim().is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyValue {
                    field: "provider.model".to_string(),
                },
                "provider.model: model name cannot be empty",
            ));
        } else if !self.model().is_known() {
            tracing::debug!(model = %self.model, "Using custom model name");
        }

        if self.base_url.trim().is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyValue {
                    field: "provider.base_url".to_string(),
                },
                "provider.base_url: base URL cannot be empty",
            ));
        }

        if self.timeout_secs == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroValue {
                    field: "provider.timeout_secs".to_string(),
                },
                "provider.timeout_secs: timeout cannot be 0",
            ));
        }

        if self.api_key.is_some() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::PlaintextSecret {
                    field: "provider.api_key".to_string(),
                },
                format!(
                    "provider.api_key: storing the key in a config file is discouraged, set {} instead",
                    self.api_key_env
                ),
            ));
        }

        issues
    }
}
