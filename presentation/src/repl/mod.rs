//! Interactive analysis session

mod command;
mod session;

pub use command::{ContextField, ReplCommand};
pub use session::SessionRepl;
