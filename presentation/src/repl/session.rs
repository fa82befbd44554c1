//! REPL (Read-Eval-Print Loop) for an interactive analysis session

use super::command::{ContextField, ReplCommand};
use crate::output::console::ConsoleFormatter;
use crate::progress::reporter::ProgressReporter;
use colored::Colorize;
use pulse_application::{AnalysisSessionController, NoProgress, ProgressNotifier};
use pulse_domain::AnalysisContext;
use reedline::{DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal};
use std::path::PathBuf;
use std::sync::Arc;

/// Number of history entries kept on disk.
const HISTORY_CAPACITY: usize = 500;

/// Interactive session REPL
pub struct SessionRepl {
    controller: Arc<AnalysisSessionController>,
    context: AnalysisContext,
    show_progress: bool,
    history_path: Option<PathBuf>,
}

impl SessionRepl {
    pub fn new(controller: Arc<AnalysisSessionController>) -> Self {
        Self {
            controller,
            context: AnalysisContext::default(),
            show_progress: true,
            history_path: dirs::data_dir().map(|p| p.join("audience-pulse").join("history.txt")),
        }
    }

    /// Set whether to show progress
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Override the history file (`None` disables history)
    pub fn with_history_path(mut self, path: Option<PathBuf>) -> Self {
        self.history_path = path;
        self
    }

    fn line_editor(&self) -> Reedline {
        let editor = Reedline::create();
        let Some(path) = &self.history_path else {
            return editor;
        };
        if let Some(parent) = path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            tracing::warn!("Could not create history directory {}: {}", parent.display(), e);
        }
        match FileBackedHistory::with_file(HISTORY_CAPACITY, path.clone()) {
            Ok(history) => editor.with_history(Box::new(history)),
            Err(e) => {
                tracing::warn!("Could not open history file {}: {}", path.display(), e);
                editor
            }
        }
    }

    /// Run the interactive REPL until `/quit` or Ctrl-D
    pub async fn run(&mut self) -> std::io::Result<()> {
        let mut editor = self.line_editor();
        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic("pulse".to_string()),
            DefaultPromptSegment::Empty,
        );

        self.print_welcome();

        loop {
            match editor.read_line(&prompt)? {
                Signal::Success(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    if !self.dispatch(ReplCommand::parse(line)).await {
                        break;
                    }
                }
                Signal::CtrlD => {
                    println!("Bye!");
                    break;
                }
                _ => {
                    self.controller.cancel();
                    println!("^C");
                }
            }
        }

        Ok(())
    }

    /// Execute one command. Returns `false` when the session should end.
    async fn dispatch(&mut self, command: ReplCommand) -> bool {
        match command {
            ReplCommand::Quit => {
                println!("Bye!");
                return false;
            }
            ReplCommand::Help => Self::print_help(),
            ReplCommand::Analyze(text) => self.analyze(&text).await,
            ReplCommand::Select(label) => {
                self.edit(&label, self.controller.select(&label), "added", "already selected")
            }
            ReplCommand::Deselect(label) => {
                self.edit(&label, self.controller.deselect(&label), "removed", "was not selected")
            }
            ReplCommand::Toggle(label) => {
                self.edit(&label, self.controller.toggle(&label), "selected", "deselected")
            }
            ReplCommand::Report => self.report().await,
            ReplCommand::SetContext(field, value) => self.set_context(field, value),
            ReplCommand::Show => self.show(),
            ReplCommand::Taxonomy => {
                let state = self.controller.snapshot();
                print!(
                    "{}",
                    ConsoleFormatter::format_taxonomy(
                        self.controller.taxonomy(),
                        Some(&state.selection)
                    )
                );
            }
            ReplCommand::Invalid(message) => println!("{}", message.yellow()),
        }
        true
    }

    async fn analyze(&self, text: &str) {
        let progress: Box<dyn ProgressNotifier> = if self.show_progress {
            Box::new(ProgressReporter::new())
        } else {
            Box::new(NoProgress)
        };

        match self
            .interruptible(self.controller.suggest_with_progress(text, progress.as_ref()))
            .await
        {
            Ok(Some(suggestion)) => {
                println!();
                print!("{}", ConsoleFormatter::format_suggestion(&suggestion));
                println!(
                    "{}",
                    ConsoleFormatter::format_selection(&self.controller.snapshot().selection)
                );
                println!(
                    "{}",
                    "Edit with +label / -label, then /report".dimmed()
                );
            }
            Ok(None) => println!("{}", "Request cancelled".dimmed()),
            Err(e) => eprintln!("{} {}", "Error:".red().bold(), e),
        }
    }

    /// Await a pipeline call; Ctrl-C cancels it through the controller and
    /// the call then resolves to `Ok(None)`.
    async fn interruptible<T>(&self, call: impl Future<Output = T>) -> T {
        tokio::pin!(call);
        tokio::select! {
            biased;
            result = &mut call => result,
            _ = tokio::signal::ctrl_c() => {
                self.controller.cancel();
                call.await
            }
        }
    }

    fn edit<E: std::fmt::Display>(
        &self,
        label: &str,
        result: Result<bool, E>,
        changed: &str,
        unchanged: &str,
    ) {
        match result {
            Ok(true) => println!("{} {}", label.green(), changed),
            Ok(false) => println!("{} {}", label, unchanged),
            Err(e) => eprintln!("{} {}", "Error:".red().bold(), e),
        }
        println!(
            "{}",
            ConsoleFormatter::format_selection(&self.controller.snapshot().selection)
        );
    }

    async fn report(&self) {
        let progress: Box<dyn ProgressNotifier> = if self.show_progress {
            Box::new(ProgressReporter::new())
        } else {
            Box::new(NoProgress)
        };

        match self
            .interruptible(
                self.controller
                    .report_with_progress(self.context.clone(), progress.as_ref()),
            )
            .await
        {
            Ok(Some(result)) => {
                println!();
                println!("{}", ConsoleFormatter::format_report(&result));
                println!();
            }
            Ok(None) => println!("{}", "Request cancelled".dimmed()),
            Err(e) => eprintln!("{} {}", "Error:".red().bold(), e),
        }
    }

    fn set_context(&mut self, field: ContextField, value: Option<String>) {
        let slot = match field {
            ContextField::Goal => &mut self.context.goal,
            ContextField::Channel => &mut self.context.channel,
            ContextField::Tone => &mut self.context.tone,
            ContextField::CompanyType => &mut self.context.company_type,
            ContextField::CompanySize => &mut self.context.company_size,
            ContextField::AudienceSize => &mut self.context.audience_size,
            ContextField::BrandContext => &mut self.context.brand_context,
            ContextField::CampaignType => &mut self.context.campaign_type,
            ContextField::TargetOutcome => &mut self.context.target_outcome,
        };
        *slot = value;
        self.print_context();
    }

    fn show(&self) {
        let state = self.controller.snapshot();
        match &state.content {
            Some(content) => println!(
                "{} {}",
                "Content:".bold(),
                pulse_domain::util::preview(content.as_str(), 200)
            ),
            None => println!("{} {}", "Content:".bold(), "(none yet)".dimmed()),
        }
        println!("{}", ConsoleFormatter::format_selection(&state.selection));
        self.print_context();
        if let Some(report) = &state.report {
            println!("{} {:?}", "Last report:".bold(), report.source());
        }
    }

    fn print_context(&self) {
        let entries = self.context.entries();
        if entries.is_empty() {
            println!("{} {}", "Context:".bold(), "(none)".dimmed());
            return;
        }
        println!("{}", "Context:".bold());
        for (label, value) in entries {
            println!("  {}: {}", label, value);
        }
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│       audience-pulse - Interactive Mode     │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Paste or type content to analyze it.");
        Self::print_help();
    }

    fn print_help() {
        println!();
        println!("Commands:");
        println!("  <text>                    - Analyze content and pre-select characteristics");
        println!("  +<label> / -<label>       - Add / remove a characteristic");
        println!("  /toggle <label>           - Flip a characteristic");
        println!("  /context <field> [value]  - Set or clear campaign context");
        println!("  /report, /r               - Generate the report");
        println!("  /show, /s                 - Show the current session");
        println!("  /taxonomy, /t             - List all characteristics");
        println!("  /help, /h, /?             - Show this help");
        println!("  /quit, /exit, /q          - Exit");
        println!();
    }
}
