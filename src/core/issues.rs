//! Barrel file detection for a single module

use crate::core::resolver::ExportGraphResolver;
use crate::error::Result;
use crate::models::exports::{ModuleId, ModuleOrigin, ReExportKind, DEFAULT_SLOT};
use crate::models::issues::BarrelIssue;
use crate::utils::import_path::{convert_absolute_path_to_relative_import_path, is_internal_specifier};

/// Report why `module` is a barrel, or which of its re-exports go through
/// another internal barrel. Nothing is rewritten.
pub fn find_barrel_issues(resolver: &mut ExportGraphResolver, module: &ModuleId) -> Result<Vec<BarrelIssue>> {
    let exports = resolver.analyze(module)?;
    let mut issues = Vec::new();

    for edge in &exports.re_exports {
        match edge.kind {
            ReExportKind::Wildcard => issues.push(BarrelIssue::ExportAll {
                module: module.to_string(),
                specifier: edge.specifier.clone(),
            }),
            ReExportKind::Namespace => {}
            ReExportKind::Named | ReExportKind::Default => {
                let ModuleOrigin::Internal(target) = resolver.locate(module, &edge.specifier)? else {
                    continue;
                };
                if forwards_internally(resolver, &target, edge.imported())? {
                    issues.push(BarrelIssue::BarrelFileReference {
                        exported_name: edge.exported().to_string(),
                        barrel_file_path: convert_absolute_path_to_relative_import_path(
                            target.path(),
                            module.dir(),
                        ),
                    });
                }
            }
        }
    }

    log::debug!("{} barrel issues in {}", issues.len(), module);
    Ok(issues)
}

/// True when `target` does not define `name` but takes it from another
/// module of the project; names behind internal wildcards must actually
/// resolve to count
fn forwards_internally(resolver: &mut ExportGraphResolver, target: &ModuleId, name: &str) -> Result<bool> {
    let exports = resolver.analyze(target)?;

    if exports.definitions.iter().any(|def| def.exported_name() == name) {
        return Ok(false);
    }

    let named = exports
        .re_exports
        .iter()
        .find(|edge| !edge.is_wildcard() && edge.exported() == name);

    Ok(match named {
        Some(edge) => is_internal_specifier(&edge.specifier),
        None if name == DEFAULT_SLOT => false,
        None => {
            let internal_wildcard = exports
                .re_exports
                .iter()
                .any(|edge| edge.is_wildcard() && is_internal_specifier(&edge.specifier));
            internal_wildcard && resolver.find_export(target, name)?.is_some()
        }
    })
}
