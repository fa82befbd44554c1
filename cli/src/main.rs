//! CLI entrypoint for audience-pulse
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::Colorize;
use pulse_application::{
    AnalysisSessionController, GenerateReportUseCase, LlmGateway, NoProgress, PipelineLogger,
    ProgressNotifier, SelectCharacteristicsUseCase,
};
use pulse_domain::{
    AnalysisContext, AnalysisRequest, ConfigIssue, NewsContent, OutputFormat, Selection, Taxonomy,
};
use pulse_infrastructure::{
    ConfigLoader, ConfigValidationError, FileConfig, JsonlPipelineLogger, OpenAiGateway,
};
use pulse_presentation::{
    AppState, Cli, Command, ConsoleFormatter, ProgressReporter, SessionRepl, SimpleProgress,
    TaxonomyListing,
};
use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration before logging so [logging] file can take effect
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!("{}", e))
            .context("failed to load configuration")?
    };

    let log_file = cli.log_file.as_ref().or(config.logging.file.as_ref());
    let _log_guard = init_logging(cli.verbose, log_file)?;

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        println!();
        println!("{}", effective_config_toml(&config)?);
        return Ok(());
    }

    match config.check() {
        Ok(warnings) => report_issues(&warnings),
        Err(ConfigValidationError::Invalid(issues)) => {
            report_issues(&issues);
            bail!("invalid configuration, see the errors above");
        }
    }

    if !config.output.color {
        colored::control::set_override(false);
    }
    let format: OutputFormat = cli.output.map(Into::into).unwrap_or(config.output.format);

    info!("Starting audience-pulse");

    // === Dependency Injection ===
    let gateway: Arc<dyn LlmGateway> = Arc::new(OpenAiGateway::new(config.to_openai_config())?);
    let taxonomy = Taxonomy::shared();
    let params = config.to_pipeline_params();

    let mut selector =
        SelectCharacteristicsUseCase::new(gateway.clone(), taxonomy.clone(), params.clone());
    let mut reporter = GenerateReportUseCase::new(gateway.clone(), params);
    if let Some(path) = &config.logging.conversation_log {
        match JsonlPipelineLogger::new(path) {
            Some(logger) => {
                let logger: Arc<dyn PipelineLogger> = Arc::new(logger);
                selector = selector.with_logger(logger.clone());
                reporter = reporter.with_logger(logger);
            }
            None => warn!("Pipeline log disabled: cannot open {}", path.display()),
        }
    }

    let command = cli.command.unwrap_or(Command::Interactive);
    match command {
        Command::Serve { host, port } => {
            let mut server = config.server.clone();
            if let Some(host) = host {
                server.host = host;
            }
            if let Some(port) = port {
                server.port = port;
            }
            let state = AppState::new(gateway, selector, reporter);
            pulse_presentation::serve(state, &server.bind_address())
                .await
                .with_context(|| format!("server failed on {}", server.bind_address()))?;
        }

        Command::Suggest { text } => {
            let content = NewsContent::new(read_text(&text)?)?;
            warn_without_credential(gateway.as_ref());

            let progress = progress_for(cli.quiet);
            let suggestion = selector.execute_with_progress(&content, progress.as_ref()).await;

            match format {
                OutputFormat::Text => print!("{}", ConsoleFormatter::format_suggestion(&suggestion)),
                OutputFormat::Json => println!("{}", ConsoleFormatter::format_json(&suggestion)),
            }
        }

        Command::Report {
            text,
            traits,
            context,
        } => {
            // Validate every input before making any external call
            let content = NewsContent::new(read_text(&text)?)?;
            let selection = Selection::from_labels(&taxonomy, &traits)?;
            let context: AnalysisContext = context.into();
            let request = AnalysisRequest::new(content, selection)?.with_context(context);
            warn_without_credential(gateway.as_ref());

            let progress = progress_for(cli.quiet);
            let result = reporter.execute_with_progress(&request, progress.as_ref()).await;

            match format {
                OutputFormat::Text => println!("{}", ConsoleFormatter::format_report(&result)),
                OutputFormat::Json => println!("{}", ConsoleFormatter::format_json(&result)),
            }
        }

        Command::Taxonomy => match format {
            OutputFormat::Text => print!("{}", ConsoleFormatter::format_taxonomy(&taxonomy, None)),
            OutputFormat::Json => {
                println!("{}", ConsoleFormatter::format_json(&TaxonomyListing::new(&taxonomy)))
            }
        },

        Command::Interactive => {
            warn_without_credential(gateway.as_ref());
            let controller = Arc::new(AnalysisSessionController::new(selector, reporter));
            let mut repl = SessionRepl::new(controller).with_progress(!cli.quiet);
            repl.run().await?;
        }
    }

    Ok(())
}

/// Console logging by verbosity, plus an optional non-blocking log file.
///
/// `RUST_LOG` overrides the verbosity flags when set. The returned guard must
/// live until exit so buffered file output is flushed.
fn init_logging(verbose: u8, log_file: Option<&PathBuf>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let console = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let (writer, guard) = tracing_appender::non_blocking(open_log_file(path)?);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file_layer)
        .init();

    Ok(guard)
}

fn open_log_file(path: &Path) -> Result<std::fs::File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("cannot create log directory {}", parent.display()))?;
    }
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file {}", path.display()))
}

/// The effective configuration as TOML, with any inline API key masked.
fn effective_config_toml(config: &FileConfig) -> Result<String> {
    let mut shown = config.clone();
    if shown.provider.api_key.is_some() {
        shown.provider.api_key = Some("********".to_string());
    }
    toml::to_string_pretty(&shown).context("cannot render configuration")
}

fn report_issues(issues: &[ConfigIssue]) {
    for issue in issues {
        eprintln!("{}", ConsoleFormatter::format_config_issue(issue));
    }
}

/// Read content from the argument, or from stdin when it is `-`.
fn read_text(arg: &str) -> Result<String> {
    if arg != "-" {
        return Ok(arg.to_string());
    }
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("failed to read content from stdin")?;
    if buf.trim().is_empty() {
        bail!("no content on stdin");
    }
    Ok(buf)
}

/// Spinner on a terminal, plain status lines when stderr is redirected.
fn progress_for(quiet: bool) -> Box<dyn ProgressNotifier> {
    if quiet {
        Box::new(NoProgress)
    } else if std::io::stderr().is_terminal() {
        Box::new(ProgressReporter::new())
    } else {
        Box::new(SimpleProgress)
    }
}

fn warn_without_credential(gateway: &dyn LlmGateway) {
    if !gateway.has_credential() {
        eprintln!(
            "{} no API key configured (set OPENAI_API_KEY); results will be the built-in defaults",
            "warning:".yellow()
        );
    }
}
