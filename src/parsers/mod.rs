//! Parsing functionality for barrel modules
//!
//! `ModuleParser` owns the OXC arena and reads files; `ModuleAnalyzer` walks
//! one program and extracts its export surface.

pub mod ast_parser;
pub mod module_analyzer;

pub use ast_parser::{ModuleParser, SourceLayout, StatementSlice};
pub use module_analyzer::ModuleAnalyzer;
