//! End-to-end flattening of one barrel module

use crate::core::issues::find_barrel_issues;
use crate::core::resolver::ExportGraphResolver;
use crate::core::rewriter::{splice_statements, Rewriter};
use crate::error::{Result, UnbarrelError};
use crate::models::config::Settings;
use crate::models::exports::ModuleId;
use crate::models::issues::CheckReport;
use crate::utils::path_resolver::PathResolver;
use std::fs;
use std::path::{Path, PathBuf};

/// What a flattening run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnbarrelOutcome {
    pub path: PathBuf,
    pub original: String,
    pub rewritten: String,
    /// Number of resolved export entries
    pub exports: usize,
}

impl UnbarrelOutcome {
    pub fn changed(&self) -> bool {
        self.original != self.rewritten
    }
}

/// Runs resolution and rewriting with one set of settings
pub struct Unbarreler {
    settings: Settings,
}

impl Unbarreler {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Compute the flattened text of `path` without touching the file
    pub fn plan(&self, path: &Path) -> Result<UnbarrelOutcome> {
        let root = resolve_input(path)?;
        let mut resolver = ExportGraphResolver::new(&self.settings);

        let (source, layout) = resolver.parser_mut().layout(root.path())?;
        if !layout.has_export_statements() {
            log::info!("{} has no re-exports, leaving it untouched", root);
            return Ok(UnbarrelOutcome {
                path: root.path().to_path_buf(),
                rewritten: source.clone(),
                original: source,
                exports: 0,
            });
        }

        let surface = resolver.resolve_root(&root)?;
        let block = Rewriter::new(resolver.path_resolver(), &root, self.settings.quote_style)
            .render(&surface);
        let rewritten = splice_statements(&source, &layout, &block);

        Ok(UnbarrelOutcome {
            path: root.path().to_path_buf(),
            original: source,
            rewritten,
            exports: surface.len(),
        })
    }

    /// Flatten `path` and write it back unless running dry
    pub fn run(&self, path: &Path) -> Result<UnbarrelOutcome> {
        let outcome = self.plan(path)?;

        if self.settings.dry_run {
            log::info!("dry run, not writing {}", outcome.path.display());
        } else if outcome.changed() {
            fs::write(&outcome.path, &outcome.rewritten).map_err(|e| UnbarrelError::FileWrite {
                path: outcome.path.clone(),
                source: e,
            })?;
            log::info!("rewrote {}", outcome.path.display());
        } else {
            log::info!("{} is already flat", outcome.path.display());
        }

        Ok(outcome)
    }

    /// Barrel issues of `path`
    pub fn check(&self, path: &Path) -> Result<CheckReport> {
        let module = resolve_input(path)?;
        let mut resolver = ExportGraphResolver::new(&self.settings);
        let issues = find_barrel_issues(&mut resolver, &module)?;

        Ok(CheckReport {
            file: module.path().to_path_buf(),
            issues,
        })
    }
}

/// Flatten `path` in place
pub fn unbarrel(path: &Path, settings: &Settings) -> Result<UnbarrelOutcome> {
    Unbarreler::new(settings.clone()).run(path)
}

/// Report barrel issues of `path`
pub fn check(path: &Path, settings: &Settings) -> Result<CheckReport> {
    Unbarreler::new(settings.clone()).check(path)
}

/// Absolute, canonical identity of a user-supplied file path
fn resolve_input(path: &Path) -> Result<ModuleId> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(UnbarrelError::io_error)?
            .join(path)
    };

    if !absolute.is_file() {
        return Err(UnbarrelError::InvalidPath { path: absolute });
    }
    PathResolver::canonicalize(&absolute)
}
