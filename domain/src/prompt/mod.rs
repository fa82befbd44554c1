//! Prompt domain
//!
//! Templates for the two prompts sent to the model: the classification
//! prompt of the selector flow and the analysis prompt of the report flow.

mod template;

pub use template::{PromptTemplate, REPORT_SECTIONS};
