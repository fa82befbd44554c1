//! Analysis session domain.
//!
//! - [`entities::SessionState`]: explicit per-session state that replaces
//!   ambient UI globals (current content, selection and report)

pub mod entities;
