//! OpenAI-compatible gateway
//!
//! Sends one chat-completion request per [`LlmGateway::complete`] call and
//! maps every failure to a distinct [`GatewayError`].

use super::protocol::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use async_trait::async_trait;
use pulse_application::{CompletionRequest, GatewayError, LlmGateway};
use pulse_domain::util::truncate_str;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error};

/// Maximum number of response-body bytes kept in error messages.
const ERROR_BODY_LIMIT: usize = 200;

/// Connection settings for an OpenAI-compatible endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// Base URL, with or without a trailing `/v1`.
    pub base_url: String,
    /// Bearer token. `None` means every call fails with
    /// [`GatewayError::MissingCredential`].
    pub api_key: Option<String>,
    /// HTTP request timeout.
    pub timeout: Duration,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".to_string(),
            api_key: None,
            timeout: Duration::from_secs(60),
        }
    }
}

/// Gateway to an OpenAI-compatible chat-completion API
pub struct OpenAiGateway {
    client: Client,
    config: OpenAiConfig,
}

impl OpenAiGateway {
    pub fn new(config: OpenAiConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GatewayError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        // Blank keys count as absent
        let config = OpenAiConfig {
            api_key: config.api_key.filter(|k| !k.trim().is_empty()),
            ..config
        };

        Ok(Self { client, config })
    }

    /// Chat-completion URL. A trailing `/v1` on the base URL is not doubled.
    fn completions_url(&self) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        let base = base.strip_suffix("/v1").unwrap_or(base);
        format!("{}/v1/chat/completions", base)
    }
}

#[async_trait]
impl LlmGateway for OpenAiGateway {
    fn has_credential(&self) -> bool {
        self.config.api_key.is_some()
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError> {
        request.validate()?;
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(GatewayError::MissingCredential)?;

        let body = ChatCompletionRequest {
            model: request.model.as_str(),
            messages: vec![ChatMessage::user(&request.prompt)],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        let url = self.completions_url();
        debug!(%url, model = body.model, max_tokens = body.max_tokens, "Sending chat completion");

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!("Chat completion request failed: {}", e);
                if e.is_timeout() {
                    GatewayError::Timeout
                } else {
                    GatewayError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            if e.is_timeout() {
                GatewayError::Timeout
            } else {
                GatewayError::Transport(format!("Failed to read response body: {}", e))
            }
        })?;

        debug!(status = status.as_u16(), bytes = text.len(), "Chat completion response");

        if !status.is_success() {
            let body = truncate_str(&text, ERROR_BODY_LIMIT).to_string();
            error!(status = status.as_u16(), %body, "Chat completion rejected");
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&text).map_err(|e| {
            GatewayError::InvalidResponse(format!(
                "JSON parse error: {}. Raw: {}",
                e,
                truncate_str(&text, ERROR_BODY_LIMIT)
            ))
        })?;

        parsed
            .into_first_content()
            .ok_or(GatewayError::EmptyCompletion)
    }
}
