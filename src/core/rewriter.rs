//! Rendering of resolved exports back into source text
//!
//! Statements are built as oxc AST nodes and printed with `oxc_codegen`, so
//! names and specifiers are always escaped the way the parser reads them back.

use crate::core::surface::{ExportGroup, ExportSurface, SurfaceEntry};
use crate::models::config::QuoteStyle;
use crate::models::exports::{ModuleId, ModuleOrigin, ResolvedExport};
use crate::parsers::ast_parser::SourceLayout;
use crate::utils::path_resolver::PathResolver;
use oxc_allocator::{Allocator, Box as ArenaBox};
use oxc_ast::ast::{
    ExportSpecifier, ImportOrExportKind, ModuleDeclaration, ModuleExportName, Statement, StringLiteral,
    WithClause,
};
use oxc_ast::AstBuilder;
use oxc_codegen::{Codegen, CodegenOptions};
use oxc_parser::Parser;
use oxc_span::{SourceType, SPAN};
use oxc_syntax::identifier::is_identifier_name;

/// Statement kept when a module ends up exporting nothing
pub const EMPTY_EXPORT: &str = "export {};";

/// Renders grouped exports as statements of the root module
pub struct Rewriter<'r> {
    paths: &'r PathResolver,
    root: &'r ModuleId,
    quote: QuoteStyle,
}

impl<'r> Rewriter<'r> {
    pub fn new(paths: &'r PathResolver, root: &'r ModuleId, quote: QuoteStyle) -> Self {
        Self { paths, root, quote }
    }

    /// One statement per origin group, plus separate wildcard and namespace
    /// statements; `export {};` when there is nothing to export
    pub fn render(&self, surface: &ExportSurface) -> Vec<String> {
        let allocator = Allocator::default();
        let ast = AstBuilder::new(&allocator);

        let statements: Vec<String> = surface
            .groups()
            .iter()
            .flat_map(|group| self.build_group(ast, group))
            .map(|declaration| self.print(&allocator, declaration))
            .collect();

        if statements.is_empty() {
            vec![EMPTY_EXPORT.to_string()]
        } else {
            statements
        }
    }

    fn build_group<'a>(&self, ast: AstBuilder<'a>, group: &ExportGroup) -> Vec<ModuleDeclaration<'a>> {
        let local = self.is_root(&group.origin);
        let source = self.source_for(&group.origin);
        let mut declarations = Vec::new();
        let mut specifiers = ast.vec();
        let mut list_slot = None;

        for entry in &group.entries {
            match entry {
                SurfaceEntry::Wildcard { type_only, .. } => {
                    declarations.push(ast.module_declaration_export_all_declaration(
                        SPAN,
                        None,
                        string_literal(ast, &source),
                        None::<ArenaBox<'_, WithClause<'_>>>,
                        export_kind(*type_only),
                    ));
                }
                SurfaceEntry::Binding(export) if export.is_namespace() => {
                    declarations.push(ast.module_declaration_export_all_declaration(
                        SPAN,
                        Some(export_name(ast, &export.exported_name)),
                        string_literal(ast, &source),
                        None::<ArenaBox<'_, WithClause<'_>>>,
                        export_kind(export.type_only),
                    ));
                }
                SurfaceEntry::Binding(export) => {
                    list_slot.get_or_insert(declarations.len());
                    specifiers.push(specifier(ast, export, local));
                }
            }
        }

        if let Some(slot) = list_slot {
            let from = if local { None } else { Some(string_literal(ast, &source)) };
            let list = ast.module_declaration_export_named_declaration(
                SPAN,
                None,
                specifiers,
                from,
                ImportOrExportKind::Value,
                None::<ArenaBox<'_, WithClause<'_>>>,
            );
            declarations.insert(slot, list);
        }
        declarations
    }

    /// Print one declaration on its own, without the trailing newline
    fn print<'a>(&self, allocator: &'a Allocator, declaration: ModuleDeclaration<'a>) -> String {
        let mut program = Parser::new(allocator, "", SourceType::ts()).parse().program;
        program.body.push(Statement::from(declaration));

        let options = CodegenOptions {
            single_quote: self.quote.is_single(),
            ..CodegenOptions::default()
        };
        Codegen::new().with_options(options).build(&program).code.trim_end().to_string()
    }

    fn is_root(&self, origin: &ModuleOrigin) -> bool {
        matches!(origin, ModuleOrigin::Internal(id) if id == self.root)
    }

    fn source_for(&self, origin: &ModuleOrigin) -> String {
        match origin {
            ModuleOrigin::Internal(id) => self.paths.specifier_for(id, self.root.dir()),
            ModuleOrigin::External(specifier) => specifier.clone(),
        }
    }
}

/// `type name`, `origin as name`, or plain `name`; root-local specifiers
/// refer to a binding rather than a module export name
fn specifier<'a>(ast: AstBuilder<'a>, export: &ResolvedExport, local: bool) -> ExportSpecifier<'a> {
    let origin = if local {
        ModuleExportName::IdentifierReference(ast.identifier_reference(SPAN, ast.atom(&export.origin_name)))
    } else {
        export_name(ast, &export.origin_name)
    };
    ast.export_specifier(
        SPAN,
        origin,
        export_name(ast, &export.exported_name),
        export_kind(export.type_only),
    )
}

fn export_name<'a>(ast: AstBuilder<'a>, name: &str) -> ModuleExportName<'a> {
    if is_identifier_name(name) {
        ModuleExportName::IdentifierName(ast.identifier_name(SPAN, ast.atom(name)))
    } else {
        ModuleExportName::StringLiteral(string_literal(ast, name))
    }
}

fn string_literal<'a>(ast: AstBuilder<'a>, value: &str) -> StringLiteral<'a> {
    ast.string_literal(SPAN, ast.atom(value), None)
}

fn export_kind(type_only: bool) -> ImportOrExportKind {
    if type_only {
        ImportOrExportKind::Type
    } else {
        ImportOrExportKind::Value
    }
}

/// Rebuild a module with its export-related statements replaced by
/// `block`, placed where the first of them was
pub fn splice_statements(source: &str, layout: &SourceLayout, block: &[String]) -> String {
    let mut pieces: Vec<&str> = Vec::new();
    let mut block_placed = false;

    let mut cursor = layout.preamble_end as usize;
    push_trimmed(&mut pieces, &source[..cursor]);

    for stmt in &layout.statements {
        let end = stmt.end as usize;
        // The gap before a statement holds its leading comments
        let text = &source[cursor..end];
        cursor = end;

        if stmt.export_related {
            if !block_placed {
                pieces.extend(block.iter().map(String::as_str));
                block_placed = true;
            }
            continue;
        }
        push_trimmed(&mut pieces, text);
    }

    push_trimmed(&mut pieces, &source[cursor..]);
    pieces.join("\n")
}

fn push_trimmed<'s>(pieces: &mut Vec<&'s str>, text: &'s str) {
    let text = text.trim();
    if !text.is_empty() {
        pieces.push(text);
    }
}
