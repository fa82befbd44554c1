//! Application-level configuration.
//!
//! - [`PipelineParams`]: model, sampling parameters, deadline and retry policy
//! - [`InferenceParams`]: sampling parameters of a single call kind

pub mod pipeline_params;

pub use pipeline_params::{InferenceParams, PipelineParams};
