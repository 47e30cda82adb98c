//! barrel-file-utils - flattens barrel modules
//!
//! Follows the re-export chains of a TypeScript/JavaScript module and rewrites
//! it so every exported name is re-exported directly from its defining module.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod output;
pub mod parsers;
pub mod utils;

// Re-export commonly used types
pub use crate::core::{check, unbarrel, ExportGraphResolver, UnbarrelOutcome, Unbarreler};
pub use error::{ErrorSeverity, Result, ResultExt, UnbarrelError};
pub use models::{
    config::Settings,
    issues::{BarrelIssue, CheckReport},
};
pub use parsers::ModuleAnalyzer;
pub use utils::path_resolver::PathResolver;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
