//! Parsing of interactive session input.

/// Campaign context field addressed by `/context <field> <value>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextField {
    Goal,
    Channel,
    Tone,
    CompanyType,
    CompanySize,
    AudienceSize,
    BrandContext,
    CampaignType,
    TargetOutcome,
}

impl ContextField {
    fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().replace('-', "_").as_str() {
            "goal" => Some(ContextField::Goal),
            "channel" => Some(ContextField::Channel),
            "tone" => Some(ContextField::Tone),
            "company_type" | "company" => Some(ContextField::CompanyType),
            "company_size" => Some(ContextField::CompanySize),
            "audience_size" | "audience" => Some(ContextField::AudienceSize),
            "brand_context" | "brand" => Some(ContextField::BrandContext),
            "campaign_type" | "campaign" => Some(ContextField::CampaignType),
            "target_outcome" | "outcome" => Some(ContextField::TargetOutcome),
            _ => None,
        }
    }
}

/// One line of REPL input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Plain text: analyze it and pre-select characteristics
    Analyze(String),
    /// `+label`
    Select(String),
    /// `-label`
    Deselect(String),
    /// `/toggle label`
    Toggle(String),
    /// `/report`
    Report,
    /// `/context <field> [value]`; an empty value clears the field
    SetContext(ContextField, Option<String>),
    /// `/show`
    Show,
    /// `/taxonomy`
    Taxonomy,
    /// `/help`
    Help,
    /// `/quit`
    Quit,
    /// Malformed or unknown command, with a hint for the user
    Invalid(String),
}

impl ReplCommand {
    /// Parse a trimmed, non-empty input line.
    pub fn parse(line: &str) -> Self {
        let line = line.trim();

        if let Some(label) = line.strip_prefix('+') {
            return Self::with_label(label, ReplCommand::Select);
        }
        // Multi-word input starting with '-' is content, e.g. "-5% rates"
        if let Some(label) = line.strip_prefix('-')
            && !label.trim().contains(char::is_whitespace)
        {
            return Self::with_label(label, ReplCommand::Deselect);
        }

        let Some(command) = line.strip_prefix('/') else {
            return ReplCommand::Analyze(line.to_string());
        };

        let (name, rest) = command
            .split_once(char::is_whitespace)
            .map(|(n, r)| (n, r.trim()))
            .unwrap_or((command, ""));

        match name {
            "quit" | "exit" | "q" => ReplCommand::Quit,
            "help" | "h" | "?" => ReplCommand::Help,
            "show" | "s" => ReplCommand::Show,
            "taxonomy" | "t" => ReplCommand::Taxonomy,
            "report" | "r" => ReplCommand::Report,
            "toggle" => Self::with_label(rest, ReplCommand::Toggle),
            "context" => {
                let (field, value) = rest
                    .split_once(char::is_whitespace)
                    .map(|(f, v)| (f, v.trim()))
                    .unwrap_or((rest, ""));
                match ContextField::parse(field) {
                    Some(field) => ReplCommand::SetContext(
                        field,
                        (!value.is_empty()).then(|| value.to_string()),
                    ),
                    None => ReplCommand::Invalid(
                        "Usage: /context <goal|channel|tone|company_type|company_size|audience_size|\
                         brand_context|campaign_type|target_outcome> [value]"
                            .to_string(),
                    ),
                }
            }
            other => ReplCommand::Invalid(format!(
                "Unknown command: /{}. Type /help for available commands",
                other
            )),
        }
    }

    fn with_label(label: &str, make: fn(String) -> ReplCommand) -> Self {
        let label = label.trim();
        if label.is_empty() {
            ReplCommand::Invalid("A characteristic label is required".to_string())
        } else {
            make(label.to_string())
        }
    }
}
