//! Progress reporting for pipeline execution

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use pulse_application::{PipelineStage, ProgressNotifier};
use std::sync::Mutex;
use std::time::Duration;

/// Spinner shown while an inference call is in flight
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn stage_display_name(stage: PipelineStage) -> &'static str {
        match stage {
            PipelineStage::Selection => "Selecting audience",
            PipelineStage::Report => "Writing report",
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_stage_start(&self, stage: PipelineStage) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_prefix(Self::stage_display_name(stage));
        pb.set_message("waiting for model...");
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut slot) = self.spinner.lock()
            && let Some(previous) = slot.replace(pb)
        {
            previous.finish_and_clear();
        }
    }

    fn on_stage_complete(&self, stage: PipelineStage, used_fallback: bool) {
        let Some(pb) = self.spinner.lock().ok().and_then(|mut slot| slot.take()) else {
            return;
        };
        let status = if used_fallback {
            format!("{} {} (fallback)", "!".yellow(), stage.as_str())
        } else {
            format!("{} {}", "v".green(), stage.as_str())
        };
        pb.finish_with_message(status);
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_stage_start(&self, stage: PipelineStage) {
        eprintln!(
            "{} {}",
            "->".cyan(),
            ProgressReporter::stage_display_name(stage).bold()
        );
    }

    fn on_stage_complete(&self, _stage: PipelineStage, used_fallback: bool) {
        if used_fallback {
            eprintln!("  {} model unavailable, using fallback", "!".yellow());
        } else {
            eprintln!("  {} done", "v".green());
        }
    }
}
