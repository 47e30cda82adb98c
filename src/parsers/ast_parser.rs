//! AST parser wrapper using OXC
//!
//! Every module is parsed as TypeScript; `.tsx`/`.jsx` files also enable JSX.
//! Results are extracted while the arena is alive, so nothing borrowed from
//! the AST outlives a parse.

use crate::error::{Result, UnbarrelError};
use crate::models::exports::{ModuleExports, ModuleId};
use crate::parsers::module_analyzer::ModuleAnalyzer;
use oxc_allocator::Allocator;
use oxc_ast::ast::{Program, Statement};
use oxc_diagnostics::OxcDiagnostic;
use oxc_parser::{ParseOptions, Parser};
use oxc_span::{GetSpan, SourceType, Span};
use std::fs;
use std::path::Path;

/// AST parser using OXC, reusing one arena across parses
pub struct ModuleParser {
    allocator: Allocator,
    parse_options: ParseOptions,
}

impl ModuleParser {
    /// Create a new AST parser
    pub fn new() -> Self {
        Self {
            allocator: Allocator::default(),
            parse_options: ParseOptions::default(),
        }
    }

    /// TypeScript for every file; JSX only for the markup variants
    pub fn source_type_for(path: &Path) -> SourceType {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        let is_markup = file_name.ends_with(".tsx") || file_name.ends_with(".jsx");
        let is_definition = file_name.ends_with(".d.ts")
            || file_name.ends_with(".d.mts")
            || file_name.ends_with(".d.cts");

        SourceType::ts()
            .with_jsx(is_markup)
            .with_typescript_definition(is_definition)
    }

    /// Read a module's source text
    pub fn read_source(path: &Path) -> Result<String> {
        fs::read_to_string(path).map_err(|e| UnbarrelError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Parse `source` and hand the program to `f` while the arena is alive
    pub fn parse_with<T, F>(&mut self, path: &Path, source: &str, f: F) -> Result<T>
    where
        F: for<'a> FnOnce(&Program<'a>) -> Result<T>,
    {
        self.allocator.reset();

        let source_type = Self::source_type_for(path);
        let ret = Parser::new(&self.allocator, source, source_type)
            .with_options(self.parse_options.clone())
            .parse();

        if ret.panicked || !ret.errors.is_empty() {
            return Err(parse_failure(path, &ret.errors));
        }

        f(&ret.program)
    }

    /// Read, parse and collect the export surface of one module
    pub fn analyze(&mut self, module: &ModuleId) -> Result<ModuleExports> {
        let path = module.path();
        let source = Self::read_source(path)?;
        let exports = self.parse_with(path, &source, |program| {
            ModuleAnalyzer::analyze(path, program)
        })?;

        log::debug!(
            "analyzed {}: {} definitions, {} re-exports",
            module,
            exports.definitions.len(),
            exports.re_exports.len()
        );
        Ok(exports)
    }

    /// Read and parse a module, returning its text and statement layout
    pub fn layout(&mut self, path: &Path) -> Result<(String, SourceLayout)> {
        let source = Self::read_source(path)?;
        let layout = self.parse_with(path, &source, |program| {
            Ok(SourceLayout::from_program(program, source.len()))
        })?;
        Ok((source, layout))
    }
}

impl Default for ModuleParser {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_failure(path: &Path, errors: &[OxcDiagnostic]) -> UnbarrelError {
    let mut messages: Vec<String> = errors.iter().map(|e| format!("{}", e)).collect();
    if messages.is_empty() {
        messages.push("parser aborted".to_string());
    }
    UnbarrelError::Parse {
        path: path.to_path_buf(),
        messages,
    }
}

/// One top-level statement of a module
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatementSlice {
    pub start: u32,
    pub end: u32,
    /// Re-export or export-specifier list, the statements a rewrite replaces
    pub export_related: bool,
}

/// Top-level shape of a module's source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLayout {
    /// End of the hashbang, directives and leading comments
    pub preamble_end: u32,
    pub statements: Vec<StatementSlice>,
    pub source_len: u32,
}

impl SourceLayout {
    pub fn from_program(program: &Program<'_>, source_len: usize) -> Self {
        let source_len = u32::try_from(source_len).unwrap_or(u32::MAX);
        let statements: Vec<StatementSlice> = program
            .body
            .iter()
            .map(|stmt| {
                let Span { start, end, .. } = stmt.span();
                StatementSlice {
                    start,
                    end,
                    export_related: is_export_related(stmt),
                }
            })
            .collect();

        Self {
            preamble_end: statements.first().map_or(source_len, |stmt| stmt.start),
            statements,
            source_len,
        }
    }

    pub fn has_export_statements(&self) -> bool {
        self.statements.iter().any(|stmt| stmt.export_related)
    }
}

/// Inline exported declarations stay where they are; everything that only
/// forwards or lists bindings is rewritten
fn is_export_related(stmt: &Statement<'_>) -> bool {
    match stmt {
        Statement::ExportAllDeclaration(_) => true,
        Statement::ExportNamedDeclaration(decl) => decl.declaration.is_none(),
        _ => false,
    }
}
