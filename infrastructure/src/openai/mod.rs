//! OpenAI-compatible chat-completion adapter.
//!
//! Implements the [`LlmGateway`](pulse_application::LlmGateway) port with a
//! single `POST /v1/chat/completions` per call.

pub mod gateway;
mod protocol;

pub use gateway::{OpenAiConfig, OpenAiGateway};
