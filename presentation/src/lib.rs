//! Presentation layer for audience-pulse
//!
//! This crate contains the HTTP JSON API, CLI definitions, output
//! formatters, progress reporters, and the interactive session.

pub mod cli;
pub mod output;
pub mod progress;
pub mod repl;
pub mod server;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, ContextArgs, OutputArg};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
pub use repl::SessionRepl;
pub use server::{ApiError, AppState, TaxonomyListing, create_router, serve};
