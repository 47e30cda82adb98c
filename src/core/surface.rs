//! Resolved export surface of a root module
//!
//! Keeps the first entry seen for every exported name. A repeat that points
//! at the same origin binding only merges its type flag, so a value export
//! absorbs a type export of the same symbol.

use crate::models::exports::{ModuleOrigin, ResolvedExport};
use indexmap::IndexMap;
use std::collections::HashMap;

/// One entry of the resolved surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEntry {
    /// A single exported name and where it comes from
    Binding(ResolvedExport),
    /// `export * from 'pkg'` of an external package, passed through as is
    Wildcard { specifier: String, type_only: bool },
}

impl SurfaceEntry {
    /// Exported name; `None` for passthrough wildcards
    pub fn exported_name(&self) -> Option<&str> {
        match self {
            SurfaceEntry::Binding(export) => Some(&export.exported_name),
            SurfaceEntry::Wildcard { .. } => None,
        }
    }

    pub fn origin(&self) -> ModuleOrigin {
        match self {
            SurfaceEntry::Binding(export) => export.origin_module.clone(),
            SurfaceEntry::Wildcard { specifier, .. } => ModuleOrigin::External(specifier.clone()),
        }
    }

    pub fn type_only(&self) -> bool {
        match self {
            SurfaceEntry::Binding(export) => export.type_only,
            SurfaceEntry::Wildcard { type_only, .. } => *type_only,
        }
    }

    pub fn mark_type_only(&mut self) {
        match self {
            SurfaceEntry::Binding(export) => export.type_only = true,
            SurfaceEntry::Wildcard { type_only, .. } => *type_only = true,
        }
    }

    fn merge_type_only(&mut self, other_type_only: bool) {
        let merged = self.type_only() && other_type_only;
        match self {
            SurfaceEntry::Binding(export) => export.type_only = merged,
            SurfaceEntry::Wildcard { type_only, .. } => *type_only = merged,
        }
    }
}

/// Entries sharing one origin module, in discovery order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportGroup {
    pub origin: ModuleOrigin,
    pub entries: Vec<SurfaceEntry>,
}

/// Deduplicated, ordered result of resolving a root module
#[derive(Debug, Clone, Default)]
pub struct ExportSurface {
    entries: Vec<SurfaceEntry>,
    by_name: HashMap<String, usize>,
    wildcards: HashMap<String, usize>,
}

impl ExportSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry unless its name or wildcard is already present
    pub fn push(&mut self, entry: SurfaceEntry) {
        let existing = match &entry {
            SurfaceEntry::Binding(export) => self.by_name.get(&export.exported_name).copied(),
            SurfaceEntry::Wildcard { specifier, .. } => self.wildcards.get(specifier).copied(),
        };

        let Some(index) = existing else {
            let index = self.entries.len();
            match &entry {
                SurfaceEntry::Binding(export) => {
                    self.by_name.insert(export.exported_name.clone(), index);
                }
                SurfaceEntry::Wildcard { specifier, .. } => {
                    self.wildcards.insert(specifier.clone(), index);
                }
            }
            self.entries.push(entry);
            return;
        };

        let current = &mut self.entries[index];
        if same_binding(current, &entry) {
            current.merge_type_only(entry.type_only());
        } else {
            log::debug!(
                "dropping duplicate export '{}' from {}",
                entry.exported_name().unwrap_or("*"),
                entry.origin()
            );
        }
    }

    pub fn entries(&self) -> &[SurfaceEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<SurfaceEntry> {
        self.entries
    }

    /// Resolved bindings, skipping passthrough wildcards
    pub fn exports(&self) -> impl Iterator<Item = &ResolvedExport> {
        self.entries.iter().filter_map(|entry| match entry {
            SurfaceEntry::Binding(export) => Some(export),
            SurfaceEntry::Wildcard { .. } => None,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries grouped by origin, groups ordered by first reference
    pub fn groups(&self) -> Vec<ExportGroup> {
        let mut groups: IndexMap<ModuleOrigin, Vec<SurfaceEntry>> = IndexMap::new();
        for entry in &self.entries {
            groups.entry(entry.origin()).or_default().push(entry.clone());
        }
        groups
            .into_iter()
            .map(|(origin, entries)| ExportGroup { origin, entries })
            .collect()
    }
}

fn same_binding(a: &SurfaceEntry, b: &SurfaceEntry) -> bool {
    match (a, b) {
        (SurfaceEntry::Binding(a), SurfaceEntry::Binding(b)) => {
            a.origin_module == b.origin_module && a.origin_name == b.origin_name
        }
        (SurfaceEntry::Wildcard { .. }, SurfaceEntry::Wildcard { .. }) => true,
        _ => false,
    }
}
