//! LLM Gateway port
//!
//! Defines the interface for one request/response exchange with a
//! chat-completion service.

use async_trait::async_trait;
use pulse_domain::Model;
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
///
/// Every failure mode is a separate variant so callers can log it precisely
/// before deciding on a fallback.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("No API credential configured")]
    MissingCredential,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Upstream returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Completion contained no choices")]
    EmptyCompletion,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Request cancelled")]
    Cancelled,
}

impl GatewayError {
    /// Whether repeating the same request could plausibly succeed.
    ///
    /// Transport failures, timeouts, rate limiting (429) and server errors
    /// (5xx) are transient; everything else is not.
    pub fn is_transient(&self) -> bool {
        match self {
            GatewayError::Transport(_) | GatewayError::Timeout => true,
            GatewayError::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

/// A single-prompt completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: Model,
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl CompletionRequest {
    pub fn new(model: Model, prompt: impl Into<String>) -> Self {
        Self {
            model,
            prompt: prompt.into(),
            max_tokens: 1000,
            temperature: 0.7,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Reject requests that must never reach the network.
    pub fn validate(&self) -> Result<(), GatewayError> {
        if self.prompt.trim().is_empty() {
            return Err(GatewayError::InvalidRequest("prompt is empty".to_string()));
        }
        if self.max_tokens == 0 {
            return Err(GatewayError::InvalidRequest(
                "max_tokens must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Gateway for LLM communication
///
/// This port defines how the application layer talks to the inference
/// service. Implementations (adapters) live in the infrastructure layer.
/// One call to [`complete`](Self::complete) is exactly one upstream request:
/// no retries, no caching.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Whether a service credential is configured.
    fn has_credential(&self) -> bool;

    /// Send the prompt as a single user message and return the text of the
    /// first completion choice.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError>;
}
