//! CLI command definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use pulse_domain::{AnalysisContext, OutputFormat};
use std::path::PathBuf;

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputArg {
    /// Human-readable, colored text
    Text,
    /// JSON, matching the HTTP API payloads
    Json,
}

impl From<OutputArg> for OutputFormat {
    fn from(arg: OutputArg) -> Self {
        match arg {
            OutputArg::Text => OutputFormat::Text,
            OutputArg::Json => OutputFormat::Json,
        }
    }
}

/// CLI arguments for audience-pulse
#[derive(Parser, Debug)]
#[command(name = "audience-pulse")]
#[command(author, version, about = "Predict how an audience will react to a piece of content")]
#[command(long_about = r#"
audience-pulse sends your content to a chat-completion model twice:

1. Selection: the model picks the audience characteristics (age, gender,
   personality, interests) most relevant to the content
2. Report: the model predicts how an audience with the chosen
   characteristics will react

If the model is unavailable, fixed defaults are returned instead.

Configuration files are loaded from (in priority order):
1. PULSE_<SECTION>__<KEY>   Environment variables
2. --config <path>          Explicit config file
3. ./pulse.toml             Project-level config
4. ~/.config/audience-pulse/config.toml   Global config

The API key is read from OPENAI_API_KEY unless configured otherwise.

Example:
  audience-pulse suggest "Company X raises subscription prices by 20%"
  audience-pulse report "Company X raises prices" -t technology -t 24-30
  audience-pulse serve --port 8080
  audience-pulse interactive
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output format (overrides [output] format)
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputArg>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Write diagnostic logs to this file
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration sources and effective values, then exit
    #[arg(long)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP JSON API
    Serve {
        /// Interface to bind (overrides [server] host)
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on (overrides [server] port)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Suggest audience characteristics for content ("-" reads stdin)
    Suggest {
        /// Content to analyze
        text: String,
    },

    /// Generate an audience-reaction report
    Report {
        /// Content to analyze ("-" reads stdin)
        text: String,

        /// Selected characteristic (repeatable)
        #[arg(short = 't', long = "trait", value_name = "LABEL", required = true)]
        traits: Vec<String>,

        #[command(flatten)]
        context: ContextArgs,
    },

    /// List the selectable characteristics
    Taxonomy,

    /// Interactive session: analyze, edit the selection, request reports
    Interactive,
}

/// Optional campaign context for the report prompt
#[derive(Args, Debug, Default, Clone)]
pub struct ContextArgs {
    /// What the message should achieve
    #[arg(long)]
    pub goal: Option<String>,
    /// Where it will be published
    #[arg(long)]
    pub channel: Option<String>,
    /// Intended tone
    #[arg(long)]
    pub tone: Option<String>,
    /// Kind of organization sending it
    #[arg(long)]
    pub company_type: Option<String>,
    /// Size of that organization
    #[arg(long)]
    pub company_size: Option<String>,
    /// Expected reach of the message
    #[arg(long)]
    pub audience_size: Option<String>,
    /// Brand background the audience already knows
    #[arg(long)]
    pub brand_context: Option<String>,
    /// Kind of campaign
    #[arg(long)]
    pub campaign_type: Option<String>,
    /// Outcome you hope for
    #[arg(long)]
    pub target_outcome: Option<String>,
}

impl From<ContextArgs> for AnalysisContext {
    fn from(args: ContextArgs) -> Self {
        AnalysisContext {
            goal: args.goal,
            channel: args.channel,
            tone: args.tone,
            company_type: args.company_type,
            company_size: args.company_size,
            audience_size: args.audience_size,
            brand_context: args.brand_context,
            campaign_type: args.campaign_type,
            target_outcome: args.target_outcome,
        }
    }
}
