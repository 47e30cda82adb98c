//! Data models and structures

pub mod config;
pub mod exports;
pub mod issues;

pub use config::{OutputFormat, PartialSettings, QuoteStyle, Settings};
pub use exports::{
    ExportDefinition, ExportItem, ExportKind, ModuleExports, ModuleId, ModuleOrigin,
    ReExportEdge, ReExportKind, ResolvedExport, DEFAULT_SLOT, NAMESPACE_SLOT,
};
pub use issues::{BarrelIssue, CheckReport};
