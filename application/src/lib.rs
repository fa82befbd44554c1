//! Application layer for audience-pulse
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{InferenceParams, PipelineParams};
pub use ports::{
    conversation_logger::{NoPipelineLogger, PipelineEvent, PipelineLogger},
    llm_gateway::{CompletionRequest, GatewayError, LlmGateway},
    progress::{NoProgress, PipelineStage, ProgressNotifier},
};
pub use use_cases::generate_report::GenerateReportUseCase;
pub use use_cases::select_characteristics::SelectCharacteristicsUseCase;
pub use use_cases::session_controller::{AnalysisSessionController, SessionError};
