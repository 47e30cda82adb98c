//! Core functionality for export resolution and rewriting

pub mod cache;
pub mod issues;
pub mod resolver;
pub mod rewriter;
pub mod surface;
pub mod unbarrel;

pub use cache::AnalysisCache;
pub use issues::find_barrel_issues;
pub use resolver::ExportGraphResolver;
pub use rewriter::{splice_statements, Rewriter};
pub use surface::{ExportGroup, ExportSurface, SurfaceEntry};
pub use unbarrel::{check, unbarrel, UnbarrelOutcome, Unbarreler};
