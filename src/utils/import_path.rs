//! Import specifier helpers
//!
//! Classifies specifiers as internal or external and turns absolute module
//! paths back into relative ESM specifiers.

use std::path::{Component, Path, PathBuf};

/// True for specifiers that point into the project (`./x`, `../x`, `/abs/x`),
/// false for package names like `react` or `@scope/pkg`
pub fn is_internal_specifier(specifier: &str) -> bool {
    specifier.starts_with('.') || specifier.starts_with('/') || Path::new(specifier).is_absolute()
}

/// Join path components with `/` regardless of platform
pub fn normalize_to_posix_path(path: &Path) -> String {
    path.components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Prefix a relative path with `./` unless it already walks up or is `.`
pub fn convert_to_esm_import_path(relative_path: &str) -> String {
    let is_dot_relative = relative_path == "."
        || relative_path == ".."
        || relative_path.starts_with("./")
        || relative_path.starts_with("../");

    if is_dot_relative {
        relative_path.to_string()
    } else {
        format!("./{}", relative_path)
    }
}

/// Relative path from `base_dir` to `target`; both must be absolute and
/// normalized
pub fn relative_path(target: &Path, base_dir: &Path) -> PathBuf {
    let target: Vec<Component<'_>> = target.components().collect();
    let base: Vec<Component<'_>> = base_dir.components().collect();

    let common = target
        .iter()
        .zip(base.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in common..base.len() {
        relative.push("..");
    }
    for component in &target[common..] {
        relative.push(component.as_os_str());
    }
    relative
}

/// `/project/src/utils/a.ts` seen from `/project/src` becomes `./utils/a.ts`
pub fn convert_absolute_path_to_relative_import_path(absolute: &Path, base_dir: &Path) -> String {
    let relative = relative_path(absolute, base_dir);
    if relative.as_os_str().is_empty() {
        return ".".to_string();
    }
    convert_to_esm_import_path(&normalize_to_posix_path(&relative))
}

/// Remove the longest matching extension from a specifier
pub fn strip_extension<'s>(specifier: &'s str, extensions: &[String]) -> Option<&'s str> {
    extensions
        .iter()
        .filter(|ext| specifier.ends_with(ext.as_str()))
        .max_by_key(|ext| ext.len())
        .map(|ext| &specifier[..specifier.len() - ext.len()])
        .filter(|stripped| !stripped.is_empty() && !stripped.ends_with('/'))
}
