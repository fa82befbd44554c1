//! Logging infrastructure: structured pipeline event logging.
//!
//! Provides [`JsonlPipelineLogger`], a JSONL file writer that implements
//! the [`PipelineLogger`](pulse_application::PipelineLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlPipelineLogger;
