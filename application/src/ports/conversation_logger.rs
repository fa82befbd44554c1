//! Port for structured pipeline event logging.
//!
//! Defines the [`PipelineLogger`] trait for recording what each pipeline run
//! produced (suggested labels, report origin and size) to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostics, while this port keeps a machine-readable
//! record (JSONL) of pipeline outcomes.

use serde_json::Value;

/// A structured pipeline event.
pub struct PipelineEvent {
    /// Event type identifier (e.g. "selection_suggested", "report_generated").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl PipelineEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging pipeline events.
///
/// `log` is synchronous and infallible; a logging failure must never affect
/// the result returned to the user.
pub trait PipelineLogger: Send + Sync {
    fn log(&self, event: PipelineEvent);
}

/// No-op implementation for tests and when event logging is disabled.
pub struct NoPipelineLogger;

impl PipelineLogger for NoPipelineLogger {
    fn log(&self, _event: PipelineEvent) {}
}
