//! Progress notification port
//!
//! Lets interactive front ends show that an inference call is in flight.

/// Pipeline stage being executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Selection,
    Report,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::Selection => "selection",
            PipelineStage::Report => "report",
        }
    }
}

/// Callback for progress updates during pipeline execution
///
/// Implementations live in the presentation layer.
pub trait ProgressNotifier: Send + Sync {
    /// Called right before the inference call is issued
    fn on_stage_start(&self, stage: PipelineStage);

    /// Called when the stage produced its result
    fn on_stage_complete(&self, stage: PipelineStage, used_fallback: bool);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_stage_start(&self, _stage: PipelineStage) {}
    fn on_stage_complete(&self, _stage: PipelineStage, _used_fallback: bool) {}
}
