//! Export surface data model
//!
//! `ModuleExports` is what one module declares before resolution;
//! `ResolvedExport` is where one exported name ends up after following every
//! re-export down to its defining module.

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Name of the default export slot
pub const DEFAULT_SLOT: &str = "default";

/// Origin name used for namespace re-exports (`export * as ns`)
pub const NAMESPACE_SLOT: &str = "*";

/// Canonicalized absolute path of a module on disk
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ModuleId(PathBuf);

impl ModuleId {
    /// Wrap an already canonical path
    pub fn from_canonical(path: PathBuf) -> Self {
        Self(path)
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    /// Directory containing the module, used as the base for relative specifiers
    pub fn dir(&self) -> &Path {
        self.0.parent().unwrap_or(&self.0)
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Where a resolved export is defined
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "camelCase")]
pub enum ModuleOrigin {
    /// A module inside the project, analyzed from source
    Internal(ModuleId),
    /// A bare package specifier; treated as an opaque definition point
    External(String),
}

impl fmt::Display for ModuleOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModuleOrigin::Internal(id) => write!(f, "{}", id),
            ModuleOrigin::External(specifier) => write!(f, "{}", specifier),
        }
    }
}

/// Whether an export occupies a named slot or the default slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ExportKind {
    Named,
    Default,
}

impl ExportKind {
    /// Slot kind for an exported or imported name
    pub fn for_name(name: &str) -> Self {
        if name == DEFAULT_SLOT {
            ExportKind::Default
        } else {
            ExportKind::Named
        }
    }
}

/// A symbol whose defining declaration lives in this module
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDefinition {
    pub kind: ExportKind,
    /// Exported name; absent for the default slot
    pub name: Option<String>,
    pub type_only: bool,
    /// Local binding name when exported through a specifier list
    /// (`export { add as renamedAdd }`), `None` for inline declarations
    pub local: Option<String>,
    /// Byte offset of the declaration or specifier
    #[serde(skip)]
    pub position: u32,
}

impl ExportDefinition {
    /// Inline named declaration such as `export function add() {}`
    pub fn named(name: impl Into<String>, type_only: bool, position: u32) -> Self {
        Self {
            kind: ExportKind::Named,
            name: Some(name.into()),
            type_only,
            local: None,
            position,
        }
    }

    /// Inline default declaration such as `export default class {}`
    pub fn default_export(type_only: bool, position: u32) -> Self {
        Self {
            kind: ExportKind::Default,
            name: None,
            type_only,
            local: None,
            position,
        }
    }

    /// Definition exported through a specifier list naming a local binding
    pub fn from_local(
        local: impl Into<String>,
        exported: &str,
        type_only: bool,
        position: u32,
    ) -> Self {
        let kind = ExportKind::for_name(exported);
        Self {
            kind,
            name: match kind {
                ExportKind::Named => Some(exported.to_string()),
                ExportKind::Default => None,
            },
            type_only,
            local: Some(local.into()),
            position,
        }
    }

    /// Name under which the module exports this symbol
    pub fn exported_name(&self) -> &str {
        match self.kind {
            ExportKind::Default => DEFAULT_SLOT,
            ExportKind::Named => self.name.as_deref().unwrap_or(DEFAULT_SLOT),
        }
    }

    /// Name of the binding inside the module
    pub fn local_name(&self) -> &str {
        self.local.as_deref().unwrap_or_else(|| self.exported_name())
    }
}

/// Kind of an outbound re-export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ReExportKind {
    /// `export * from './x'`
    Wildcard,
    /// `export { a as b } from './x'`
    Named,
    /// `export { default as b } from './x'` or a re-exported default import
    Default,
    /// `export * as ns from './x'` or a re-exported namespace import
    Namespace,
}

/// An export whose definition lives in another module
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReExportEdge {
    pub kind: ReExportKind,
    /// Name looked up in the target module
    pub imported_name: Option<String>,
    /// Name under which this module exports the symbol
    pub exported_name: Option<String>,
    /// Specifier as written in the source
    pub specifier: String,
    pub type_only: bool,
    #[serde(skip)]
    pub position: u32,
}

impl ReExportEdge {
    pub fn wildcard(specifier: impl Into<String>, type_only: bool, position: u32) -> Self {
        Self {
            kind: ReExportKind::Wildcard,
            imported_name: None,
            exported_name: None,
            specifier: specifier.into(),
            type_only,
            position,
        }
    }

    /// Named or default re-export, picked from the imported name
    pub fn binding(
        imported: &str,
        exported: &str,
        specifier: impl Into<String>,
        type_only: bool,
        position: u32,
    ) -> Self {
        let kind = match ExportKind::for_name(imported) {
            ExportKind::Default => ReExportKind::Default,
            ExportKind::Named => ReExportKind::Named,
        };
        Self {
            kind,
            imported_name: Some(imported.to_string()),
            exported_name: Some(exported.to_string()),
            specifier: specifier.into(),
            type_only,
            position,
        }
    }

    pub fn namespace(
        exported: &str,
        specifier: impl Into<String>,
        type_only: bool,
        position: u32,
    ) -> Self {
        Self {
            kind: ReExportKind::Namespace,
            imported_name: Some(NAMESPACE_SLOT.to_string()),
            exported_name: Some(exported.to_string()),
            specifier: specifier.into(),
            type_only,
            position,
        }
    }

    pub fn is_wildcard(&self) -> bool {
        self.kind == ReExportKind::Wildcard
    }

    /// Exported name; empty for wildcards
    pub fn exported(&self) -> &str {
        self.exported_name.as_deref().unwrap_or_default()
    }

    /// Name sought in the target module; defaults to the exported name
    pub fn imported(&self) -> &str {
        self.imported_name
            .as_deref()
            .unwrap_or_else(|| self.exported())
    }
}

/// One export item of a module, borrowed from its `ModuleExports`
#[derive(Debug, Clone, Copy)]
pub enum ExportItem<'m> {
    Definition(&'m ExportDefinition),
    ReExport(&'m ReExportEdge),
}

impl ExportItem<'_> {
    fn position(&self) -> u32 {
        match self {
            ExportItem::Definition(def) => def.position,
            ExportItem::ReExport(edge) => edge.position,
        }
    }
}

/// The full export surface of one module before resolution
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleExports {
    pub definitions: Vec<ExportDefinition>,
    pub re_exports: Vec<ReExportEdge>,
}

impl ModuleExports {
    /// Definitions and re-exports interleaved back into source order
    pub fn items(&self) -> Vec<ExportItem<'_>> {
        let mut items: Vec<ExportItem<'_>> = self
            .definitions
            .iter()
            .map(ExportItem::Definition)
            .chain(self.re_exports.iter().map(ExportItem::ReExport))
            .collect();
        items.sort_by_key(|item| item.position());
        items
    }

    /// Every name this module exports explicitly (everything but wildcards)
    pub fn explicit_names(&self) -> impl Iterator<Item = &str> {
        self.definitions
            .iter()
            .map(ExportDefinition::exported_name)
            .chain(
                self.re_exports
                    .iter()
                    .filter(|edge| !edge.is_wildcard())
                    .map(ReExportEdge::exported),
            )
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty() && self.re_exports.is_empty()
    }
}

/// Terminal result of following one export item to its defining module
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedExport {
    pub exported_name: String,
    pub origin_module: ModuleOrigin,
    /// Name inside the origin: its exported name, `default`, `*` for a
    /// namespace, or the local binding for root-local definitions
    pub origin_name: String,
    pub type_only: bool,
}

impl ResolvedExport {
    pub fn is_namespace(&self) -> bool {
        self.origin_name == NAMESPACE_SLOT
    }
}
