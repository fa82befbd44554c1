//! Static results used when the language model cannot be used.
//!
//! Both values are constants: repeated failures always yield exactly the same
//! suggestion and report.

use crate::taxonomy::suggestion::SelectionSuggestion;

/// The suggestion returned when the selector call fails or its reply is
/// unusable.
pub fn default_suggestion() -> SelectionSuggestion {
    SelectionSuggestion {
        ages: vec!["24-30".to_string(), "31-40".to_string()],
        genders: vec!["male".to_string(), "female".to_string()],
        personality_traits: vec!["openness".to_string(), "conscientiousness".to_string()],
        interests: vec!["technology".to_string()],
    }
}

/// The report returned when the report call fails. Not personalized.
pub const FALLBACK_REPORT: &str = r#"<div class="report report-fallback">
<p class="report-notice"><strong>Note:</strong> The full audience analysis is currently unavailable. The guidance below is general and was not tailored to your content.</p>

<h3>Overall Reaction</h3>
<p>Audiences usually react to news through the lens of how it affects them personally. Expect a mix of neutral, curious and skeptical responses until the practical impact is clear.</p>

<h3>Concerns &amp; Interests</h3>
<ul>
<li>Cost, convenience and fairness are the most common concerns.</li>
<li>People want to know what changes for them and when.</li>
</ul>

<h3>Engagement Behavior</h3>
<p>Short, concrete messages are shared more often than long announcements. Clear headlines and a single call to action improve engagement.</p>

<h3>Potential Misconceptions</h3>
<p>Ambiguous wording invites worst-case interpretations. Address likely misunderstandings directly instead of waiting for them to spread.</p>

<h3>Messaging Recommendations</h3>
<ul>
<li>Lead with the benefit or the reason behind the change.</li>
<li>Use plain language and avoid jargon.</li>
<li>Offer a channel for questions and respond visibly.</li>
</ul>

<h3>Demographic Considerations</h3>
<p>Different age groups and interest communities prefer different channels and levels of detail. Test the message with a small sample of each target group before a wide release.</p>
</div>"#;
