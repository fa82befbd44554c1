//! Use cases (application services)
//!
//! - [`select_characteristics`]: free text to a sanitized selection suggestion
//! - [`generate_report`]: content plus selection to an audience report
//! - [`session_controller`]: per-session state around both pipelines

pub mod generate_report;
pub mod select_characteristics;
pub mod session_controller;
pub(crate) mod shared;

#[cfg(test)]
pub(crate) mod test_support;
