//! Export graph resolution
//!
//! Follows every export item of a root module down to the module that
//! defines it. Named lookups walk definitions, then named re-exports, then
//! wildcards; wildcard edges expand to the full surface of their target.

use crate::core::cache::AnalysisCache;
use crate::core::surface::{ExportSurface, SurfaceEntry};
use crate::error::{Result, UnbarrelError};
use crate::models::config::Settings;
use crate::models::exports::{
    ExportItem, ExportKind, ModuleExports, ModuleId, ModuleOrigin, ReExportEdge, ReExportKind,
    ResolvedExport, DEFAULT_SLOT, NAMESPACE_SLOT,
};
use crate::parsers::ast_parser::ModuleParser;
use crate::utils::import_path::is_internal_specifier;
use crate::utils::path_resolver::PathResolver;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

/// Result of a named lookup; `assumed` when attributed to an external
/// wildcard that cannot be inspected
#[derive(Debug, Clone)]
struct Lookup {
    export: ResolvedExport,
    assumed: bool,
}

/// `(module, name)` pairs on the current named-lookup path
type LookupChain = Vec<(ModuleId, String)>;

/// What a module exports through `export *`, every wildcard below expanded
#[derive(Debug, Clone)]
struct ExpandedSurface {
    entries: Rc<Vec<SurfaceEntry>>,
    /// Modules on the longest wildcard chain, this one included
    height: usize,
}

/// Resolves export items across modules, analyzing each module once
pub struct ExportGraphResolver {
    parser: ModuleParser,
    paths: PathResolver,
    cache: AnalysisCache,
    max_depth: usize,
    root: Option<ModuleId>,
    surfaces: HashMap<ModuleId, ExpandedSurface>,
    /// Lowest wildcard stack position a cycle was cut at
    cycle_cut: Option<usize>,
}

impl ExportGraphResolver {
    pub fn new(settings: &Settings) -> Self {
        Self::with_path_resolver(PathResolver::new(settings.extensions.clone()), settings.max_depth)
    }

    pub fn with_path_resolver(paths: PathResolver, max_depth: usize) -> Self {
        Self {
            parser: ModuleParser::new(),
            paths,
            cache: AnalysisCache::new(),
            max_depth,
            root: None,
            surfaces: HashMap::new(),
            cycle_cut: None,
        }
    }

    pub fn path_resolver(&self) -> &PathResolver {
        &self.paths
    }

    pub fn parser_mut(&mut self) -> &mut ModuleParser {
        &mut self.parser
    }

    pub fn cache_stats(&self) -> (usize, usize, usize) {
        self.cache.stats()
    }

    /// Export surface of one module, parsed at most once per resolver
    pub fn analyze(&mut self, module: &ModuleId) -> Result<Rc<ModuleExports>> {
        let parser = &mut self.parser;
        self.cache
            .get_or_try_insert_with(module, || parser.analyze(module))
    }

    /// Where `specifier`, written in `from`, points
    pub fn locate(&self, from: &ModuleId, specifier: &str) -> Result<ModuleOrigin> {
        if !is_internal_specifier(specifier) {
            return Ok(ModuleOrigin::External(specifier.to_string()));
        }
        self.paths
            .resolve(specifier, from.dir())
            .map(ModuleOrigin::Internal)
    }

    /// Where `name`, as exported by `module`, is defined. `None` when no
    /// project module provides it, including names only an external
    /// wildcard could supply
    pub fn find_export(&mut self, module: &ModuleId, name: &str) -> Result<Option<ResolvedExport>> {
        let lookup = self.lookup(module, name, &mut Vec::new(), 1)?;
        Ok(lookup.filter(|lookup| !lookup.assumed).map(|lookup| lookup.export))
    }

    /// Resolve every export item of `root`, in source order
    pub fn resolve_root(&mut self, root: &ModuleId) -> Result<ExportSurface> {
        log::info!("resolving exports of {}", root);
        self.root = Some(root.clone());
        self.surfaces.clear();
        self.cycle_cut = None;

        let exports = self.analyze(root)?;
        let shadowed: HashSet<&str> = exports.explicit_names().collect();
        let mut surface = ExportSurface::new();

        for item in exports.items() {
            match item {
                // Inline declarations stay in the rewritten file as written
                ExportItem::Definition(def) if def.local.is_none() => {}
                ExportItem::Definition(def) => surface.push(SurfaceEntry::Binding(ResolvedExport {
                    exported_name: def.exported_name().to_string(),
                    origin_module: ModuleOrigin::Internal(root.clone()),
                    origin_name: def.local_name().to_string(),
                    type_only: def.type_only,
                })),
                ExportItem::ReExport(edge) if edge.is_wildcard() => {
                    let (entries, _) = self.expand_wildcard(root, edge, &mut vec![root.clone()], 1)?;
                    for entry in entries {
                        if entry.exported_name().is_some_and(|name| shadowed.contains(name)) {
                            log::debug!(
                                "'{}' from {} is shadowed by an explicit export",
                                entry.exported_name().unwrap_or_default(),
                                edge.specifier
                            );
                            continue;
                        }
                        surface.push(entry);
                    }
                }
                ExportItem::ReExport(edge) => {
                    let resolved = self.resolve_edge(root, edge, &mut Vec::new(), 1)?;
                    surface.push(SurfaceEntry::Binding(resolved));
                }
            }
        }

        let (entries, hits, misses) = self.cache.stats();
        log::debug!(
            "resolved {} entries from {} modules ({} cache hits, {} misses)",
            surface.len(),
            entries,
            hits,
            misses
        );
        Ok(surface)
    }

    /// Follow one named, default or namespace edge to its origin
    fn resolve_edge(
        &mut self,
        from: &ModuleId,
        edge: &ReExportEdge,
        chain: &mut LookupChain,
        depth: usize,
    ) -> Result<ResolvedExport> {
        let exported_name = edge.exported().to_string();

        let target = match self.locate(from, &edge.specifier)? {
            ModuleOrigin::External(specifier) => {
                return Ok(ResolvedExport {
                    exported_name,
                    origin_module: ModuleOrigin::External(specifier),
                    origin_name: edge.imported().to_string(),
                    type_only: edge.type_only,
                });
            }
            ModuleOrigin::Internal(target) => target,
        };

        if edge.kind == ReExportKind::Namespace {
            return Ok(ResolvedExport {
                exported_name,
                origin_module: ModuleOrigin::Internal(target),
                origin_name: NAMESPACE_SLOT.to_string(),
                type_only: edge.type_only,
            });
        }

        let imported = edge.imported();
        let lookup = self
            .lookup(&target, imported, chain, depth)?
            .ok_or_else(|| unresolved_export(&target, imported))?;

        if lookup.assumed {
            log::warn!(
                "'{}' not found in {}; assuming it comes from {}",
                imported,
                target,
                lookup.export.origin_module
            );
        }

        Ok(ResolvedExport {
            exported_name,
            type_only: lookup.export.type_only || edge.type_only,
            ..lookup.export
        })
    }

    /// Find where `module` gets `name` from
    fn lookup(
        &mut self,
        module: &ModuleId,
        name: &str,
        chain: &mut LookupChain,
        depth: usize,
    ) -> Result<Option<Lookup>> {
        let key = (module.clone(), name.to_string());
        if chain.contains(&key) {
            chain.push(key);
            return Err(ambiguous(module, name, chain, "re-export cycle"));
        }
        if depth > self.max_depth {
            chain.push(key);
            return Err(ambiguous(module, name, chain, "re-export chain too deep"));
        }

        chain.push(key);
        let result = self.lookup_in(module, name, chain, depth);
        chain.pop();
        result
    }

    fn lookup_in(
        &mut self,
        module: &ModuleId,
        name: &str,
        chain: &mut LookupChain,
        depth: usize,
    ) -> Result<Option<Lookup>> {
        let exports = self.analyze(module)?;

        let mut definitions = exports
            .definitions
            .iter()
            .filter(|def| def.exported_name() == name)
            .peekable();
        if let Some(def) = definitions.peek().copied() {
            // Overloads and declaration merging: value wins over type
            let type_only = definitions.all(|def| def.type_only);
            let origin_name = if self.root.as_ref() == Some(module) {
                if def.kind == ExportKind::Default && def.local.is_none() {
                    return Err(UnbarrelError::unsupported(
                        module.path(),
                        "the anonymous default export of the root module cannot be re-exported",
                    ));
                }
                def.local_name().to_string()
            } else {
                name.to_string()
            };

            return Ok(Some(Lookup {
                export: ResolvedExport {
                    exported_name: name.to_string(),
                    origin_module: ModuleOrigin::Internal(module.clone()),
                    origin_name,
                    type_only,
                },
                assumed: false,
            }));
        }

        if let Some(edge) = exports
            .re_exports
            .iter()
            .find(|edge| !edge.is_wildcard() && edge.exported() == name)
        {
            let export = self.resolve_edge(module, edge, chain, depth + 1)?;
            return Ok(Some(Lookup {
                export,
                assumed: false,
            }));
        }

        if name == DEFAULT_SLOT {
            return Ok(None);
        }

        let mut fallback: Option<Lookup> = None;
        for edge in exports.re_exports.iter().filter(|edge| edge.is_wildcard()) {
            let candidate = match self.locate(module, &edge.specifier)? {
                ModuleOrigin::External(specifier) => Some(Lookup {
                    export: ResolvedExport {
                        exported_name: name.to_string(),
                        origin_module: ModuleOrigin::External(specifier),
                        origin_name: name.to_string(),
                        type_only: edge.type_only,
                    },
                    assumed: true,
                }),
                ModuleOrigin::Internal(target) => {
                    // Wildcard loops simply provide nothing
                    if chain.iter().any(|(m, n)| m == &target && n == name) {
                        continue;
                    }
                    self.lookup(&target, name, chain, depth + 1)?
                        .map(|mut lookup| {
                            lookup.export.type_only |= edge.type_only;
                            lookup
                        })
                }
            };

            match candidate {
                Some(lookup) if !lookup.assumed => return Ok(Some(lookup)),
                Some(lookup) => {
                    fallback.get_or_insert(lookup);
                }
                None => {}
            }
        }

        Ok(fallback)
    }

    /// Entries a wildcard edge of `from` contributes, with the height of the
    /// wildcard chain behind them
    fn expand_wildcard(
        &mut self,
        from: &ModuleId,
        edge: &ReExportEdge,
        visiting: &mut Vec<ModuleId>,
        depth: usize,
    ) -> Result<(Vec<SurfaceEntry>, usize)> {
        let target = match self.locate(from, &edge.specifier)? {
            ModuleOrigin::External(specifier) => {
                let entry = SurfaceEntry::Wildcard {
                    specifier,
                    type_only: edge.type_only,
                };
                return Ok((vec![entry], 0));
            }
            ModuleOrigin::Internal(target) => target,
        };

        let expanded = self.collect_surface(&target, visiting, depth)?;
        let mut entries = expanded.entries.as_ref().clone();
        if edge.type_only {
            for entry in &mut entries {
                entry.mark_type_only();
            }
        }
        Ok((entries, expanded.height))
    }

    /// Everything `module` exports, as seen through `export *`; expanded
    /// once per run unless a cycle above it cut the expansion short
    fn collect_surface(
        &mut self,
        module: &ModuleId,
        visiting: &mut Vec<ModuleId>,
        depth: usize,
    ) -> Result<ExpandedSurface> {
        if let Some(position) = visiting.iter().position(|id| id == module) {
            log::debug!("wildcard cycle through {}, stopping", module);
            self.cycle_cut = Some(self.cycle_cut.map_or(position, |cut| cut.min(position)));
            return Ok(ExpandedSurface {
                entries: Rc::new(Vec::new()),
                height: 0,
            });
        }
        if let Some(expanded) = self.surfaces.get(module) {
            if depth + expanded.height - 1 > self.max_depth {
                return Err(wildcard_too_deep(module, visiting));
            }
            return Ok(expanded.clone());
        }
        if depth > self.max_depth {
            return Err(wildcard_too_deep(module, visiting));
        }

        let position = visiting.len();
        let outer_cut = self.cycle_cut.take();
        visiting.push(module.clone());
        let result = self.collect_surface_of(module, visiting, depth);
        visiting.pop();

        let inner_cut = self.cycle_cut.take();
        self.cycle_cut = match (outer_cut, inner_cut.filter(|cut| *cut < position)) {
            (Some(outer), Some(inner)) => Some(outer.min(inner)),
            (outer, inner) => outer.or(inner),
        };

        let expanded = result?;
        if inner_cut.is_none_or(|cut| cut >= position) {
            self.surfaces.insert(module.clone(), expanded.clone());
        }
        Ok(expanded)
    }

    fn collect_surface_of(
        &mut self,
        module: &ModuleId,
        visiting: &mut Vec<ModuleId>,
        depth: usize,
    ) -> Result<ExpandedSurface> {
        let exports = self.analyze(module)?;
        let explicit: HashSet<&str> = exports.explicit_names().collect();
        let mut surface = ExportSurface::new();
        let mut height = 1;

        for item in exports.items() {
            match item {
                ExportItem::Definition(def) => {
                    if def.kind == ExportKind::Default {
                        continue;
                    }
                    surface.push(SurfaceEntry::Binding(ResolvedExport {
                        exported_name: def.exported_name().to_string(),
                        origin_module: ModuleOrigin::Internal(module.clone()),
                        origin_name: def.exported_name().to_string(),
                        type_only: def.type_only,
                    }));
                }
                ExportItem::ReExport(edge) if edge.is_wildcard() => {
                    let (entries, below) = self.expand_wildcard(module, edge, visiting, depth + 1)?;
                    height = height.max(below + 1);
                    for entry in entries {
                        if entry.exported_name().is_some_and(|name| explicit.contains(name)) {
                            continue;
                        }
                        surface.push(entry);
                    }
                }
                ExportItem::ReExport(edge) => {
                    if edge.exported() == DEFAULT_SLOT {
                        continue;
                    }
                    let resolved = self.resolve_edge(module, edge, &mut Vec::new(), depth + 1)?;
                    surface.push(SurfaceEntry::Binding(resolved));
                }
            }
        }

        Ok(ExpandedSurface {
            entries: Rc::new(surface.into_entries()),
            height,
        })
    }
}

fn wildcard_too_deep(module: &ModuleId, visiting: &[ModuleId]) -> UnbarrelError {
    log::debug!("wildcard chain through {} too deep", module);
    UnbarrelError::AmbiguousReExport {
        module: module.path().to_path_buf(),
        name: "*".to_string(),
        chain: visiting.iter().map(|id| id.to_string()).collect(),
    }
}

fn ambiguous(module: &ModuleId, name: &str, chain: &LookupChain, reason: &str) -> UnbarrelError {
    log::debug!("{} while looking up '{}' in {}", reason, name, module);
    UnbarrelError::AmbiguousReExport {
        module: module.path().to_path_buf(),
        name: name.to_string(),
        chain: chain
            .iter()
            .map(|(module, name)| format!("{} ({})", module, name))
            .collect(),
    }
}

fn unresolved_export(module: &ModuleId, name: &str) -> UnbarrelError {
    UnbarrelError::UnresolvedExport {
        module: module.path().to_path_buf(),
        names: vec![name.to_string()],
    }
}
