//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`]: chat-completion models the service can target
//! - [`content::NewsContent`]: validated free text submitted for analysis
//! - [`error::DomainError`]: domain-level errors

pub mod content;
pub mod error;
pub mod model;
