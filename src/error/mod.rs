//! Error handling for barrel-file-utils
//!
//! Error types, the crate-wide result alias, and context utilities.

pub mod context;
pub mod types;

pub use context::ResultExt;
pub use types::{ErrorSeverity, Result, UnbarrelError};
