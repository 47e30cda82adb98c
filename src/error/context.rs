//! Error context utilities
//!
//! Helpers for attaching a message or a file path to foreign errors.

use crate::error::{Result, UnbarrelError};
use std::path::Path;

/// Extension trait for Result to add context to errors
pub trait ResultExt<T, E> {
    /// Add context to an error with a custom message
    fn with_context<C, F>(self, context: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: std::fmt::Display;

    /// Add file context to an error
    fn with_file_context<P: AsRef<Path>>(self, path: P) -> Result<T>;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: std::error::Error + 'static,
{
    fn with_context<C, F>(self, context: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: std::fmt::Display,
    {
        self.map_err(|err| UnbarrelError::Context {
            message: format!("{}: {}", context(), err),
        })
    }

    fn with_file_context<P: AsRef<Path>>(self, path: P) -> Result<T> {
        self.map_err(|err| {
            let path = path.as_ref().to_path_buf();
            let dyn_err: &(dyn std::error::Error + 'static) = &err;
            match dyn_err.downcast_ref::<std::io::Error>() {
                Some(io_err) => UnbarrelError::FileRead {
                    path,
                    source: std::io::Error::new(io_err.kind(), io_err.to_string()),
                },
                None => UnbarrelError::Context {
                    message: format!("{}: {}", path.display(), err),
                },
            }
        })
    }
}
