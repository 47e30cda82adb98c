//! Barrel-file issue records produced by `check`

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// A reason a module is, or depends on, a barrel file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BarrelIssue {
    /// `export * from '...'` makes the module itself a barrel
    #[serde(rename_all = "camelCase")]
    ExportAll { module: String, specifier: String },

    /// A re-export that points at another internal barrel instead of the
    /// defining module
    #[serde(rename_all = "camelCase")]
    BarrelFileReference {
        exported_name: String,
        barrel_file_path: String,
    },
}

impl fmt::Display for BarrelIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BarrelIssue::ExportAll { specifier, .. } => {
                write!(f, "export * from '{}' re-exports an entire module", specifier)
            }
            BarrelIssue::BarrelFileReference {
                exported_name,
                barrel_file_path,
            } => write!(
                f,
                "'{}' is re-exported through barrel file {}",
                exported_name, barrel_file_path
            ),
        }
    }
}

/// Issues found in one module
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckReport {
    pub file: PathBuf,
    pub issues: Vec<BarrelIssue>,
}

impl CheckReport {
    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }
}
