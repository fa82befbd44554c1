//! Output format value object

use serde::{Deserialize, Serialize};

/// How command-line results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable, colored text (default)
    #[default]
    Text,
    /// JSON matching the HTTP API payloads
    Json,
}
