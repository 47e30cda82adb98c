//! Caching of per-module analysis results
//!
//! Every module is parsed at most once per run, no matter how many re-export
//! chains pass through it.

use crate::error::Result;
use crate::models::exports::{ModuleExports, ModuleId};
use std::collections::HashMap;
use std::rc::Rc;

/// Memo of analyzed modules keyed by canonical identity
#[derive(Default)]
pub struct AnalysisCache {
    cache: HashMap<ModuleId, Rc<ModuleExports>>,
    hits: usize,
    misses: usize,
}

impl AnalysisCache {
    /// Create a new empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a cached result
    pub fn get(&mut self, module: &ModuleId) -> Option<Rc<ModuleExports>> {
        let found = self.cache.get(module).cloned();
        if found.is_some() {
            self.hits += 1;
        }
        found
    }

    /// Return the cached result or compute and store it; failures are not
    /// cached
    pub fn get_or_try_insert_with<F>(&mut self, module: &ModuleId, compute: F) -> Result<Rc<ModuleExports>>
    where
        F: FnOnce() -> Result<ModuleExports>,
    {
        if let Some(exports) = self.get(module) {
            return Ok(exports);
        }

        self.misses += 1;
        let exports = Rc::new(compute()?);
        self.cache.insert(module.clone(), Rc::clone(&exports));
        Ok(exports)
    }

    /// Clear the cache
    pub fn clear(&mut self) {
        self.cache.clear();
        self.hits = 0;
        self.misses = 0;
    }

    /// Get the number of cached entries
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Get cache statistics as (entries, hits, misses)
    pub fn stats(&self) -> (usize, usize, usize) {
        (self.len(), self.hits, self.misses)
    }
}
