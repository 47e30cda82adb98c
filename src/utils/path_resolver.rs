//! Module path resolution utilities
//!
//! Turns an import specifier into a canonical module identity by checking an
//! explicit, ordered list of candidate paths. The first candidate that is an
//! existing file wins.

use crate::error::{Result, ResultExt, UnbarrelError};
use crate::models::config::DEFAULT_EXTENSIONS;
use crate::models::exports::ModuleId;
use crate::utils::import_path::{convert_absolute_path_to_relative_import_path, strip_extension};
use std::cell::RefCell;
use std::collections::HashMap;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Why a candidate path was generated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeKind {
    /// The specifier as written
    Literal,
    /// Specifier plus a source extension
    WithExtension,
    /// `./a.js` standing in for `./a.ts`
    ScriptSubstitute,
    /// `index` file inside a directory
    DirectoryIndex,
}

/// One path to check during resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub path: PathBuf,
    pub probe: ProbeKind,
}

/// Path resolver with a file-existence cache
pub struct PathResolver {
    extensions: Vec<String>,
    file_exists_cache: RefCell<HashMap<PathBuf, bool>>,
}

impl PathResolver {
    /// Create a resolver probing the given extensions in order
    pub fn new(extensions: Vec<String>) -> Self {
        Self {
            extensions,
            file_exists_cache: RefCell::new(HashMap::new()),
        }
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Resolve `specifier` relative to `from_dir`
    pub fn resolve(&self, specifier: &str, from_dir: &Path) -> Result<ModuleId> {
        let base = from_dir.join(specifier);

        let found = self
            .candidates(&base)
            .into_iter()
            .find(|candidate| self.check_file_exists(&candidate.path));

        match found {
            Some(candidate) => {
                log::trace!(
                    "resolved {} from {} via {:?}",
                    specifier,
                    from_dir.display(),
                    candidate.probe
                );
                Self::canonicalize(&candidate.path)
            }
            None => Err(UnbarrelError::UnresolvedModule {
                specifier: specifier.to_string(),
                from: from_dir.to_path_buf(),
            }),
        }
    }

    /// Canonical identity of a path that is known to exist
    pub fn canonicalize(path: &Path) -> Result<ModuleId> {
        let canonical = fs::canonicalize(path).with_file_context(path)?;
        Ok(ModuleId::from_canonical(canonical))
    }

    /// Every candidate for `base`, in probe order
    pub fn candidates(&self, base: &Path) -> Vec<Candidate> {
        let mut candidates = vec![Candidate {
            path: base.to_path_buf(),
            probe: ProbeKind::Literal,
        }];

        for ext in &self.extensions {
            candidates.push(Candidate {
                path: append_extension(base, ext),
                probe: ProbeKind::WithExtension,
            });
        }

        if let Some(substitutes) = script_substitutes(base) {
            for path in substitutes {
                candidates.push(Candidate {
                    path,
                    probe: ProbeKind::ScriptSubstitute,
                });
            }
        }

        if base.is_dir() {
            for ext in &self.extensions {
                candidates.push(Candidate {
                    path: base.join(format!("index{}", ext)),
                    probe: ProbeKind::DirectoryIndex,
                });
            }
        }

        candidates
    }

    /// Shortest specifier, as seen from `from_dir`, that resolves back to
    /// `target`: directory form for index files, then extensionless, then
    /// the full file name
    pub fn specifier_for(&self, target: &ModuleId, from_dir: &Path) -> String {
        let full = convert_absolute_path_to_relative_import_path(target.path(), from_dir);
        let mut candidates = Vec::new();

        if let Some(stripped) = strip_extension(&full, &self.extensions) {
            if let Some(dir) = stripped.strip_suffix("/index") {
                if dir != "." && dir != ".." {
                    candidates.push(dir.to_string());
                }
            }
            candidates.push(stripped.to_string());
        }

        candidates
            .into_iter()
            .find(|candidate| {
                self.resolve(candidate, from_dir)
                    .map(|resolved| &resolved == target)
                    .unwrap_or(false)
            })
            .unwrap_or(full)
    }

    /// Check if file exists with caching
    fn check_file_exists(&self, path: &Path) -> bool {
        if let Some(cached) = self.file_exists_cache.borrow().get(path) {
            return *cached;
        }

        let exists = path.is_file();
        self.file_exists_cache
            .borrow_mut()
            .insert(path.to_path_buf(), exists);
        exists
    }
}

impl Default for PathResolver {
    fn default() -> Self {
        Self::new(DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect())
    }
}

fn append_extension(base: &Path, ext: &str) -> PathBuf {
    let mut raw: OsString = base.as_os_str().to_owned();
    raw.push(ext);
    PathBuf::from(raw)
}

/// TypeScript lets `./a.js` name `./a.ts`; list the typed files a script
/// extension may stand for
fn script_substitutes(base: &Path) -> Option<Vec<PathBuf>> {
    let ext = base.extension()?.to_str()?;
    let typed: &[&str] = match ext {
        "js" => &["ts", "tsx"],
        "jsx" => &["tsx"],
        "mjs" => &["mts"],
        "cjs" => &["cts"],
        _ => return None,
    };
    Some(typed.iter().map(|t| base.with_extension(t)).collect())
}
