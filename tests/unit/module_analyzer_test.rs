//! Export surface extraction through the public parser API

use barrel_file_utils::{
    models::exports::{ExportKind, ModuleExports, ReExportKind},
    parsers::ModuleParser,
    PathResolver, UnbarrelError,
};
use std::fs;
use tempfile::TempDir;

fn analyze(source: &str) -> Result<ModuleExports, UnbarrelError> {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("module.ts");
    fs::write(&path, source).unwrap();

    let id = PathResolver::canonicalize(&path).unwrap();
    ModuleParser::new().analyze(&id)
}

#[test]
fn test_mixed_module_surface() {
    let exports = analyze(
        "
        import def, { a as b } from './a';
        import * as ns from './ns';
        export const { x, y: [z] } = obj;
        export default class {}
        export { def, b, ns };
        export * from './all';
        export * as grouped from './grouped';
        ",
    )
    .unwrap();

    let names: Vec<&str> = exports
        .definitions
        .iter()
        .map(|def| def.exported_name())
        .collect();
    assert_eq!(names, vec!["x", "z", "default"]);
    assert_eq!(exports.definitions[2].kind, ExportKind::Default);

    let edges: Vec<(ReExportKind, &str, &str)> = exports
        .re_exports
        .iter()
        .map(|edge| (edge.kind, edge.exported(), edge.specifier.as_str()))
        .collect();
    assert!(edges.contains(&(ReExportKind::Default, "def", "./a")));
    assert!(edges.contains(&(ReExportKind::Named, "b", "./a")));
    assert!(edges.contains(&(ReExportKind::Namespace, "ns", "./ns")));
    assert!(edges.contains(&(ReExportKind::Wildcard, "", "./all")));
    assert!(edges.contains(&(ReExportKind::Namespace, "grouped", "./grouped")));
}

#[test]
fn test_type_flags() {
    let exports = analyze(
        "
        import type { T } from './t';
        export { T };
        export type * from './types';
        export interface I {}
        export { type V } from './v';
        ",
    )
    .unwrap();

    assert!(exports.re_exports.iter().all(|edge| edge.type_only));
    assert!(exports.definitions.iter().all(|def| def.type_only));
}

#[test]
fn test_unknown_local_is_an_error() {
    let err = analyze("export { ghost };").unwrap_err();

    match err {
        UnbarrelError::UnresolvedExport { names, .. } => assert_eq!(names, vec!["ghost".to_string()]),
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_export_assignment_is_unsupported() {
    let err = analyze("const x = 1;\nexport = x;").unwrap_err();

    assert!(matches!(err, UnbarrelError::UnsupportedConstruct { .. }));
}
