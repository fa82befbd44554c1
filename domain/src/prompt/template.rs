//! Prompt templates for the selector and report flows

use crate::analysis::AnalysisRequest;
use crate::core::content::NewsContent;
use crate::taxonomy::Taxonomy;

/// Section headings the report prompt asks for, in order.
pub const REPORT_SECTIONS: [&str; 6] = [
    "Overall Reaction",
    "Concerns & Interests",
    "Engagement Behavior",
    "Potential Misconceptions",
    "Messaging Recommendations",
    "Demographic Considerations",
];

/// Templates for generating the prompts sent to the model
pub struct PromptTemplate;

impl PromptTemplate {
    /// Classification prompt: pick audience characteristics from the
    /// taxonomy for the given content.
    pub fn selection_prompt(taxonomy: &Taxonomy, content: &NewsContent) -> String {
        let mut prompt = String::from(
            r#"You are an expert audience analyst. Read the content below and decide which audience characteristics are most relevant to how people will react to it.

Choose ONLY from these options:
"#,
        );

        for (category, labels) in taxonomy.iter() {
            prompt.push_str(&format!(
                "- {} ({}): {}\n",
                category.key(),
                category.display_name(),
                labels.join(", ")
            ));
        }

        prompt.push_str(&format!(
            r#"
Content:
"""
{}
"""

Respond with ONLY a JSON object, no markdown and no commentary, using exactly this structure:
{{"ages": [], "genders": [], "personality_traits": [], "interests": []}}

Rules:
1. Every value must be copied exactly from the options listed for that key.
2. Pick 1-3 values per key; use an empty list if nothing fits."#,
            content.as_str()
        ));

        prompt
    }

    /// Analysis prompt: predict how the selected audience reacts.
    pub fn report_prompt(request: &AnalysisRequest) -> String {
        let mut prompt = format!(
            r#"You are an expert in audience research and communications. Predict how an audience with the following characteristics would react to the content below.

Audience characteristics: {}
"#,
            request.selection().joined()
        );

        let context = request.context().entries();
        if !context.is_empty() {
            prompt.push_str("\nCampaign context:\n");
            for (label, value) in context {
                prompt.push_str(&format!("- {}: {}\n", label, value));
            }
        }

        prompt.push_str(&format!(
            r#"
Content:
"""
{}
"""

Write the analysis as an HTML fragment (no <html> or <body> tags). Use an <h3> heading for each of these six sections, in this order:
"#,
            request.content().as_str()
        ));

        for (i, section) in REPORT_SECTIONS.iter().enumerate() {
            prompt.push_str(&format!("{}. {}\n", i + 1, section));
        }

        prompt.push_str(
            r#"
Under each heading use short paragraphs or <ul> lists. Be specific to the content and the audience; avoid generic advice."#,
        );

        prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::AnalysisContext;
    use crate::taxonomy::selection::Selection;

    fn content(text: &str) -> NewsContent {
        NewsContent::new(text).unwrap()
    }

    #[test]
    fn test_selection_prompt_lists_every_label() {
        let taxonomy = Taxonomy::shared();
        let prompt = PromptTemplate::selection_prompt(&taxonomy, &content("New phone released"));
        for (category, labels) in taxonomy.iter() {
            assert!(prompt.contains(category.key()));
            for label in labels {
                assert!(prompt.contains(label.as_str()), "missing {label}");
            }
        }
        assert!(prompt.contains("New phone released"));
        assert!(prompt.contains(r#"{"ages": [], "genders": [], "personality_traits": [], "interests": []}"#));
    }

    #[test]
    fn test_report_prompt_embeds_selection_and_content() {
        let taxonomy = Taxonomy::shared();
        let selection =
            Selection::from_labels(&taxonomy, ["technology", "male", "24-30"]).unwrap();
        let request =
            AnalysisRequest::new(content("Company X raises prices"), selection).unwrap();
        let prompt = PromptTemplate::report_prompt(&request);

        assert!(prompt.contains("Audience characteristics: technology, male, 24-30"));
        assert!(prompt.contains("Company X raises prices"));
        for section in REPORT_SECTIONS {
            assert!(prompt.contains(section));
        }
        assert!(!prompt.contains("Campaign context"));
        // No leftover format placeholders
        assert!(!prompt.contains("{}"));
        assert!(!prompt.contains("{{"));
    }

    #[test]
    fn test_report_prompt_includes_context() {
        let taxonomy = Taxonomy::shared();
        let selection = Selection::from_labels(&taxonomy, ["finance"]).unwrap();
        let request = AnalysisRequest::new(content("Rates go up"), selection)
            .unwrap()
            .with_context(AnalysisContext {
                channel: Some("newsletter".into()),
                company_size: Some("regional".into()),
                audience_size: Some("40k subscribers".into()),
                brand_context: Some("family-owned since 1952".into()),
                campaign_type: Some("rate announcement".into()),
                ..Default::default()
            });
        let prompt = PromptTemplate::report_prompt(&request);
        assert!(prompt.contains(
            "Campaign context:\n\
             - Channel: newsletter\n\
             - Company size: regional\n\
             - Audience size: 40k subscribers\n\
             - Brand context: family-owned since 1952\n\
             - Campaign type: rate announcement\n"
        ));
    }
}
