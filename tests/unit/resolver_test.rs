//! Export graph resolution through the public resolver API

use barrel_file_utils::{
    models::{config::Settings, exports::ModuleOrigin},
    ExportGraphResolver, PathResolver,
};
use std::fs;
use tempfile::TempDir;

fn project(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (relative, contents) in files {
        let path = dir.path().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }
    dir
}

#[test]
fn test_chain_length_does_not_matter() {
    let dir = project(&[
        ("index.ts", "export { e } from './h1';"),
        ("h1.ts", "export { d as e } from './h2';"),
        ("h2.ts", "export { c as d } from './h3';"),
        ("h3.ts", "export { b as c } from './h4';"),
        ("h4.ts", "export { a as b } from './def';"),
        ("def.ts", "export const a = 1;"),
    ]);
    let root = PathResolver::canonicalize(&dir.path().join("index.ts")).unwrap();
    let def = PathResolver::canonicalize(&dir.path().join("def.ts")).unwrap();

    let mut resolver = ExportGraphResolver::new(&Settings::default());
    let surface = resolver.resolve_root(&root).unwrap();
    let exports: Vec<_> = surface.exports().collect();

    assert_eq!(exports.len(), 1);
    assert_eq!(exports[0].exported_name, "e");
    assert_eq!(exports[0].origin_name, "a");
    assert_eq!(exports[0].origin_module, ModuleOrigin::Internal(def));
}

#[test]
fn test_type_and_value_paths_merge_to_value() {
    let dir = project(&[
        ("index.ts", "export * from './types';\nexport * from './values';"),
        ("types.ts", "export type { Add } from './add';"),
        ("values.ts", "export { Add } from './add';"),
        ("add.ts", "export function Add() {}"),
    ]);
    let root = PathResolver::canonicalize(&dir.path().join("index.ts")).unwrap();

    let mut resolver = ExportGraphResolver::new(&Settings::default());
    let surface = resolver.resolve_root(&root).unwrap();
    let exports: Vec<_> = surface.exports().collect();

    assert_eq!(exports.len(), 1);
    assert!(!exports[0].type_only);
}

#[test]
fn test_cache_reuses_shared_modules() {
    let dir = project(&[
        ("index.ts", "export * from './a';\nexport * from './b';"),
        ("a.ts", "export { shared } from './shared';"),
        ("b.ts", "export { shared as other } from './shared';"),
        ("shared.ts", "export const shared = 1;"),
    ]);
    let root = PathResolver::canonicalize(&dir.path().join("index.ts")).unwrap();

    let mut resolver = ExportGraphResolver::new(&Settings::default());
    resolver.resolve_root(&root).unwrap();

    let (entries, hits, misses) = resolver.cache_stats();
    assert_eq!(entries, 4);
    assert_eq!(misses, 4);
    assert!(hits >= 1);
}
