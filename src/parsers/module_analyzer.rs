//! Export surface extraction using AST visitor pattern
//!
//! The first pass records every export statement. Specifier lists without a
//! source (`export { a as b }`) only name a local binding, so a second pass
//! over imports and top-level declarations decides whether each one is a
//! definition of this module or a re-export of an imported binding.

use crate::error::{Result, UnbarrelError};
use crate::models::exports::{ExportDefinition, ModuleExports, ReExportEdge};
use indexmap::IndexMap;
use oxc_ast::ast::*;
use std::collections::HashMap;
use std::path::Path;

/// Export specifier waiting for its local binding to be found
#[derive(Debug, Clone)]
struct PendingExport {
    exported: String,
    type_only: bool,
    position: u32,
}

/// A name introduced by a declaration
#[derive(Debug, Clone)]
struct DeclaredBinding {
    name: String,
    type_only: bool,
    position: u32,
}

impl DeclaredBinding {
    fn new(name: &str, type_only: bool, position: u32) -> Self {
        Self {
            name: name.to_string(),
            type_only,
            position,
        }
    }
}

/// Visitor collecting the export surface of one module
pub struct ModuleAnalyzer<'p, 'a> {
    path: &'p Path,
    definitions: Vec<ExportDefinition>,
    re_exports: Vec<ReExportEdge>,
    pending: IndexMap<String, Vec<PendingExport>>,
    /// Definitions created from a pending specifier, by local name, with the
    /// specifier's own type flag
    matched: HashMap<String, Vec<(usize, bool)>>,
    _phantom: std::marker::PhantomData<&'a ()>,
}

impl<'p, 'a> ModuleAnalyzer<'p, 'a> {
    /// Analyze a program AST and return its exports in source order
    pub fn analyze(path: &'p Path, program: &Program<'a>) -> Result<ModuleExports> {
        let mut analyzer = Self {
            path,
            definitions: Vec::new(),
            re_exports: Vec::new(),
            pending: IndexMap::new(),
            matched: HashMap::new(),
            _phantom: std::marker::PhantomData,
        };

        for stmt in &program.body {
            analyzer.visit_statement(stmt)?;
        }

        if !analyzer.pending.is_empty() {
            analyzer.match_local_bindings(program)?;
        }

        Ok(analyzer.finish())
    }

    fn visit_statement(&mut self, stmt: &Statement<'a>) -> Result<()> {
        match stmt {
            Statement::ExportNamedDeclaration(decl) => self.visit_export_named_declaration(decl),
            Statement::ExportDefaultDeclaration(decl) => {
                self.visit_export_default_declaration(decl);
                Ok(())
            }
            Statement::ExportAllDeclaration(decl) => {
                self.visit_export_all_declaration(decl);
                Ok(())
            }
            Statement::TSExportAssignment(_) => Err(UnbarrelError::unsupported(
                self.path,
                "`export =` assignments cannot be flattened",
            )),
            // `export as namespace X` only names a UMD global
            _ => Ok(()),
        }
    }

    fn visit_export_named_declaration(&mut self, decl: &ExportNamedDeclaration<'a>) -> Result<()> {
        if let Some(declaration) = &decl.declaration {
            for binding in declared_bindings(self.path, declaration)? {
                self.definitions.push(ExportDefinition::named(
                    binding.name,
                    binding.type_only,
                    binding.position,
                ));
            }
            return Ok(());
        }

        let statement_type_only = decl.export_kind.is_type();
        for specifier in &decl.specifiers {
            let type_only = statement_type_only || specifier.export_kind.is_type();
            let local = specifier.local.name();
            let exported = specifier.exported.name();
            let position = specifier.span.start;

            match &decl.source {
                Some(source) => self.re_exports.push(ReExportEdge::binding(
                    local.as_str(),
                    exported.as_str(),
                    source.value.as_str(),
                    type_only,
                    position,
                )),
                None => self
                    .pending
                    .entry(local.to_string())
                    .or_default()
                    .push(PendingExport {
                        exported: exported.to_string(),
                        type_only,
                        position,
                    }),
            }
        }
        Ok(())
    }

    fn visit_export_default_declaration(&mut self, decl: &ExportDefaultDeclaration<'a>) {
        let type_only = matches!(
            decl.declaration,
            ExportDefaultDeclarationKind::TSInterfaceDeclaration(_)
        );
        self.definitions
            .push(ExportDefinition::default_export(type_only, decl.span.start));
    }

    fn visit_export_all_declaration(&mut self, decl: &ExportAllDeclaration<'a>) {
        let source = decl.source.value.as_str();
        let type_only = decl.export_kind.is_type();
        let edge = match &decl.exported {
            Some(exported) => {
                ReExportEdge::namespace(exported.name().as_str(), source, type_only, decl.span.start)
            }
            None => ReExportEdge::wildcard(source, type_only, decl.span.start),
        };
        self.re_exports.push(edge);
    }

    /// Second pass: bind pending specifiers to imports or local declarations
    fn match_local_bindings(&mut self, program: &Program<'a>) -> Result<()> {
        for stmt in &program.body {
            match stmt {
                Statement::ImportDeclaration(import) => self.match_import(import),
                Statement::ExportNamedDeclaration(export) => {
                    if let Some(declaration) = &export.declaration {
                        self.match_declaration(declaration)?;
                    }
                }
                Statement::ExportDefaultDeclaration(export) => {
                    if let Some(binding) = default_declaration_binding(&export.declaration) {
                        self.match_binding(binding);
                    }
                }
                _ => {
                    if let Some(declaration) = stmt.as_declaration() {
                        self.match_declaration(declaration)?;
                    }
                }
            }
        }

        if self.pending.is_empty() {
            return Ok(());
        }

        Err(UnbarrelError::UnresolvedExport {
            module: self.path.to_path_buf(),
            names: self.pending.keys().cloned().collect(),
        })
    }

    fn match_import(&mut self, import: &ImportDeclaration<'a>) {
        let Some(specifiers) = &import.specifiers else {
            return;
        };
        let source = import.source.value.as_str();
        let statement_type_only = import.import_kind.is_type();

        for specifier in specifiers {
            match specifier {
                ImportDeclarationSpecifier::ImportSpecifier(spec) => {
                    let imported = spec.imported.name();
                    let type_only = statement_type_only || spec.import_kind.is_type();
                    for pending in self.take_pending(spec.local.name.as_str()) {
                        self.re_exports.push(ReExportEdge::binding(
                            imported.as_str(),
                            &pending.exported,
                            source,
                            type_only || pending.type_only,
                            pending.position,
                        ));
                    }
                }
                ImportDeclarationSpecifier::ImportDefaultSpecifier(spec) => {
                    for pending in self.take_pending(spec.local.name.as_str()) {
                        self.re_exports.push(ReExportEdge::binding(
                            "default",
                            &pending.exported,
                            source,
                            statement_type_only || pending.type_only,
                            pending.position,
                        ));
                    }
                }
                ImportDeclarationSpecifier::ImportNamespaceSpecifier(spec) => {
                    for pending in self.take_pending(spec.local.name.as_str()) {
                        self.re_exports.push(ReExportEdge::namespace(
                            &pending.exported,
                            source,
                            statement_type_only || pending.type_only,
                            pending.position,
                        ));
                    }
                }
            }
        }
    }

    fn match_declaration(&mut self, declaration: &Declaration<'a>) -> Result<()> {
        for binding in declared_bindings(self.path, declaration)? {
            self.match_binding(binding);
        }
        Ok(())
    }

    /// A name declared both as a type and as a value is a value
    fn match_binding(&mut self, binding: DeclaredBinding) {
        if let Some(pendings) = self.pending.shift_remove(&binding.name) {
            let mut indices = Vec::with_capacity(pendings.len());
            for pending in pendings {
                indices.push((self.definitions.len(), pending.type_only));
                self.definitions.push(ExportDefinition::from_local(
                    binding.name.as_str(),
                    &pending.exported,
                    binding.type_only || pending.type_only,
                    pending.position,
                ));
            }
            self.matched.insert(binding.name, indices);
        } else if let Some(indices) = self.matched.get(&binding.name) {
            for &(index, specifier_type_only) in indices {
                let merged = binding.type_only || specifier_type_only;
                let definition = &mut self.definitions[index];
                definition.type_only = definition.type_only && merged;
            }
        }
    }

    fn take_pending(&mut self, local: &str) -> Vec<PendingExport> {
        self.pending.shift_remove(local).unwrap_or_default()
    }

    fn finish(mut self) -> ModuleExports {
        self.definitions.sort_by_key(|def| def.position);
        self.re_exports.sort_by_key(|edge| edge.position);
        ModuleExports {
            definitions: self.definitions,
            re_exports: self.re_exports,
        }
    }
}

/// Names a declaration introduces at module scope
fn declared_bindings(path: &Path, declaration: &Declaration<'_>) -> Result<Vec<DeclaredBinding>> {
    let mut bindings = Vec::new();

    match declaration {
        Declaration::VariableDeclaration(var_decl) => {
            for declarator in &var_decl.declarations {
                collect_pattern_bindings(&declarator.id, &mut bindings);
            }
        }
        Declaration::FunctionDeclaration(func_decl) => match &func_decl.id {
            Some(id) => bindings.push(DeclaredBinding::new(&id.name, false, id.span.start)),
            None => return Err(UnbarrelError::unsupported(path, "function declaration without a name")),
        },
        Declaration::ClassDeclaration(class_decl) => match &class_decl.id {
            Some(id) => bindings.push(DeclaredBinding::new(&id.name, false, id.span.start)),
            None => return Err(UnbarrelError::unsupported(path, "class declaration without a name")),
        },
        Declaration::TSTypeAliasDeclaration(alias) => {
            bindings.push(DeclaredBinding::new(&alias.id.name, true, alias.id.span.start));
        }
        Declaration::TSInterfaceDeclaration(interface) => {
            bindings.push(DeclaredBinding::new(
                &interface.id.name,
                true,
                interface.id.span.start,
            ));
        }
        Declaration::TSEnumDeclaration(enum_decl) => {
            bindings.push(DeclaredBinding::new(&enum_decl.id.name, false, enum_decl.id.span.start));
        }
        Declaration::TSModuleDeclaration(module_decl) => {
            // `declare module 'pkg'` augments another module and defines nothing here
            if let TSModuleDeclarationName::Identifier(id) = &module_decl.id {
                bindings.push(DeclaredBinding::new(&id.name, false, id.span.start));
            }
        }
        Declaration::TSImportEqualsDeclaration(import_equals) => {
            bindings.push(DeclaredBinding::new(
                &import_equals.id.name,
                import_equals.import_kind.is_type(),
                import_equals.id.span.start,
            ));
        }
        #[allow(unreachable_patterns)]
        _ => {
            return Err(UnbarrelError::unsupported(
                path,
                "unrecognized exported declaration",
            ))
        }
    }

    Ok(bindings)
}

/// Every identifier bound by a (possibly destructuring) pattern
fn collect_pattern_bindings(pattern: &BindingPattern<'_>, out: &mut Vec<DeclaredBinding>) {
    match &pattern.kind {
        BindingPatternKind::BindingIdentifier(id) => {
            out.push(DeclaredBinding::new(&id.name, false, id.span.start));
        }
        BindingPatternKind::ObjectPattern(object) => {
            for property in &object.properties {
                collect_pattern_bindings(&property.value, out);
            }
            if let Some(rest) = &object.rest {
                collect_pattern_bindings(&rest.argument, out);
            }
        }
        BindingPatternKind::ArrayPattern(array) => {
            for element in array.elements.iter().flatten() {
                collect_pattern_bindings(element, out);
            }
            if let Some(rest) = &array.rest {
                collect_pattern_bindings(&rest.argument, out);
            }
        }
        BindingPatternKind::AssignmentPattern(assignment) => {
            collect_pattern_bindings(&assignment.left, out);
        }
    }
}

/// Local name of `export default function foo() {}` and friends
fn default_declaration_binding(kind: &ExportDefaultDeclarationKind<'_>) -> Option<DeclaredBinding> {
    match kind {
        ExportDefaultDeclarationKind::FunctionDeclaration(func) => func
            .id
            .as_ref()
            .map(|id| DeclaredBinding::new(&id.name, false, id.span.start)),
        ExportDefaultDeclarationKind::ClassDeclaration(class) => class
            .id
            .as_ref()
            .map(|id| DeclaredBinding::new(&id.name, false, id.span.start)),
        ExportDefaultDeclarationKind::TSInterfaceDeclaration(interface) => Some(
            DeclaredBinding::new(&interface.id.name, true, interface.id.span.start),
        ),
        _ => None,
    }
}
