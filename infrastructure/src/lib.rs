//! Infrastructure layer for audience-pulse
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod openai;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileLoggingConfig, FileOutputConfig,
    FileProviderConfig, FileReportConfig, FileSelectorConfig, FileServerConfig,
};
pub use logging::JsonlPipelineLogger;
pub use openai::{OpenAiConfig, OpenAiGateway};
