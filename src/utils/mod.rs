//! Path and specifier utilities

pub mod import_path;
pub mod path_resolver;

pub use import_path::{
    convert_absolute_path_to_relative_import_path, convert_to_esm_import_path,
    is_internal_specifier,
};
pub use path_resolver::{Candidate, PathResolver, ProbeKind};
