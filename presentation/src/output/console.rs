//! Console output formatter for pipeline results

use colored::Colorize;
use pulse_domain::{
    AnalysisResult, ConfigIssue, SelectionSuggestion, Selection, Severity, Taxonomy,
};
use scraper::{ElementRef, Html, Node};

/// Formats pipeline results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Suggested characteristics, one category per line.
    pub fn format_suggestion(suggestion: &SelectionSuggestion) -> String {
        let mut output = String::new();
        output.push_str(&format!("{}\n", "Suggested audience".cyan().bold()));
        for (category, labels) in suggestion.iter() {
            let value = if labels.is_empty() {
                "-".dimmed().to_string()
            } else {
                labels.join(", ")
            };
            output.push_str(&format!(
                "  {:<20} {}\n",
                format!("{}:", category.display_name()).bold(),
                value
            ));
        }
        output
    }

    /// The report rendered from HTML to plain terminal text.
    pub fn format_report(result: &AnalysisResult) -> String {
        let mut output = String::new();
        if result.is_fallback() {
            output.push_str(&format!(
                "{}\n\n",
                "Model unavailable - showing the generic fallback report".yellow()
            ));
        }
        output.push_str(&render_html(result.report()));
        output
    }

    /// Every category with its labels; selected labels are highlighted.
    pub fn format_taxonomy(taxonomy: &Taxonomy, selection: Option<&Selection>) -> String {
        let mut output = String::new();
        for (category, labels) in taxonomy.iter() {
            output.push_str(&format!(
                "{} {}\n",
                category.display_name().cyan().bold(),
                format!("({})", category.key()).dimmed()
            ));
            let rendered: Vec<String> = labels
                .iter()
                .map(|label| match selection {
                    Some(selection) if selection.contains(label) => {
                        format!("[x] {}", label).green().bold().to_string()
                    }
                    Some(_) => format!("[ ] {}", label),
                    None => label.clone(),
                })
                .collect();
            let separator = if selection.is_some() { "  " } else { ", " };
            output.push_str(&format!("  {}\n", rendered.join(separator)));
        }
        output
    }

    /// Current selection as a single line.
    pub fn format_selection(selection: &Selection) -> String {
        if selection.is_empty() {
            format!("{} {}", "Selected:".bold(), "(none)".dimmed())
        } else {
            format!("{} {}", "Selected:".bold(), selection.joined().green())
        }
    }

    pub fn format_config_issue(issue: &ConfigIssue) -> String {
        match issue.severity {
            Severity::Error => format!("{} {}", "error:".red().bold(), issue.message),
            Severity::Warning => format!("{} {}", "warning:".yellow().bold(), issue.message),
        }
    }

    /// Pretty JSON of any serializable result.
    pub fn format_json<T: serde::Serialize>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Convert an HTML report fragment into readable text.
///
/// Headings become bold cyan lines, list items become bullets and
/// paragraphs are separated by blank lines. Unknown tags are flattened.
pub fn render_html(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let mut out = String::new();
    render_children(fragment.root_element(), &mut out);
    tidy(&out)
}

fn render_children(element: ElementRef, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => push_words(out, text),
            Node::Element(_) => {
                if let Some(child) = ElementRef::wrap(child) {
                    render_element(child, out);
                }
            }
            _ => {}
        }
    }
}

fn render_element(element: ElementRef, out: &mut String) {
    match element.value().name() {
        "script" | "style" => {}
        "h1" | "h2" | "h3" | "h4" => {
            let mut heading = String::new();
            render_children(element, &mut heading);
            out.push_str(&format!("\n\n{}\n", heading.trim().cyan().bold()));
        }
        "li" => {
            out.push_str("\n  * ");
            render_children(element, out);
        }
        "p" | "div" | "ul" | "ol" => {
            out.push_str("\n\n");
            render_children(element, out);
            out.push('\n');
        }
        "br" => out.push('\n'),
        "strong" | "b" => {
            let mut inner = String::new();
            render_children(element, &mut inner);
            push_words(out, &inner.trim().bold().to_string());
        }
        _ => render_children(element, out),
    }
}

/// Append text with collapsed whitespace.
fn push_words(out: &mut String, text: &str) {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return;
    }
    if !out.is_empty() && !out.ends_with(char::is_whitespace) {
        out.push(' ');
    }
    out.push_str(&words.join(" "));
}

/// Trim lines and allow at most one blank line in a row.
fn tidy(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut blank_run = 0;
    for line in text.lines().map(str::trim_end) {
        if line.trim().is_empty() {
            blank_run += 1;
            if blank_run > 1 || result.is_empty() {
                continue;
            }
        } else {
            blank_run = 0;
        }
        result.push_str(line);
        result.push('\n');
    }
    result.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_domain::{FALLBACK_REPORT, default_suggestion};

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_render_html_structure() {
        plain();
        let text = render_html(
            "<h3>Overall Reaction</h3><p>Mostly   positive.</p><ul><li>Price</li><li>Timing</li></ul>",
        );
        assert_eq!(
            text,
            "Overall Reaction\n\nMostly positive.\n\n  * Price\n  * Timing"
        );
    }

    #[test]
    fn test_render_html_decodes_entities() {
        plain();
        let text = render_html("<h3>Concerns &amp; Interests</h3>");
        assert_eq!(text, "Concerns & Interests");
    }

    #[test]
    fn test_render_plain_text_passthrough() {
        plain();
        assert_eq!(render_html("Just text, no markup."), "Just text, no markup.");
    }

    #[test]
    fn test_fallback_report_renders_every_section() {
        plain();
        let text = ConsoleFormatter::format_report(&AnalysisResult::fallback());
        assert!(text.starts_with("Model unavailable"));
        assert!(text.contains("Concerns & Interests"));
        assert!(text.contains("Demographic Considerations"));
        assert!(!text.contains('<'));
        assert!(FALLBACK_REPORT.contains('<'));
    }

    #[test]
    fn test_format_suggestion() {
        plain();
        let text = ConsoleFormatter::format_suggestion(&default_suggestion());
        assert!(text.contains("24-30, 31-40"));
        assert!(text.contains("technology"));
    }

    #[test]
    fn test_format_taxonomy_marks_selection() {
        plain();
        let taxonomy = Taxonomy::shared();
        let selection = Selection::from_labels(&taxonomy, ["sports"]).unwrap();
        let text = ConsoleFormatter::format_taxonomy(&taxonomy, Some(&selection));
        assert!(text.contains("[x] sports"));
        assert!(text.contains("[ ] food"));
    }

    #[test]
    fn test_format_json() {
        let json = ConsoleFormatter::format_json(&AnalysisResult::from_model("<p>x</p>"));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["source"], "model");
    }
}
