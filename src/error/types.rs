//! Error types and definitions for barrel-file-utils
//!
//! Every failure is terminal for the current invocation: the root file is either
//! rewritten in full or left untouched.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Error severity levels, used to pick the process exit code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// The current operation failed
    Error,
    /// Configuration or output failure, nothing could run
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Main error type for barrel-file-utils operations
#[derive(Debug, Error)]
pub enum UnbarrelError {
    /// Standard IO errors
    #[error("IO error: {source}")]
    Io {
        #[source]
        source: std::io::Error,
    },

    /// Failure reading a module's source text
    #[error("Error reading {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failure writing the rewritten root module
    #[error("Error writing {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Source text that the parser rejected
    #[error("Failed to parse {path}: {}", messages.join("; "))]
    Parse { path: PathBuf, messages: Vec<String> },

    /// Specifier that does not resolve to any file via the probe order
    #[error("Could not resolve module: {specifier} (from {})", from.display())]
    UnresolvedModule { specifier: String, from: PathBuf },

    /// Exported names that cannot be located within a module
    #[error("Could not find {} in {}", names.join(", "), module.display())]
    UnresolvedExport { module: PathBuf, names: Vec<String> },

    /// Cycle (or runaway depth) while following a re-export chain
    #[error("Ambiguous re-export of '{name}' in {}: {}", module.display(), chain.join(" -> "))]
    AmbiguousReExport {
        module: PathBuf,
        name: String,
        chain: Vec<String>,
    },

    /// Construct outside the supported grammar subset
    #[error("Unsupported construct in {}: {message}", path.display())]
    UnsupportedConstruct { path: PathBuf, message: String },

    /// Invalid path errors
    #[error("Invalid path: {}", path.display())]
    InvalidPath { path: PathBuf },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Configuration file not found
    #[error("Configuration file not found at {}", path.display())]
    ConfigNotFound { path: PathBuf },

    /// Configuration file read errors
    #[error("Error reading configuration file {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file parse errors
    #[error("Error parsing configuration file {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// JSON serialization error
    #[error("JSON serialization error: {source}")]
    JsonSerialize {
        #[source]
        source: serde_json::Error,
    },

    /// Stdout write errors
    #[error("Error writing to stdout: {source}")]
    StdoutWrite {
        #[source]
        source: std::io::Error,
    },

    /// Foreign error wrapped with a message
    #[error("{message}")]
    Context { message: String },
}

impl UnbarrelError {
    /// Get the severity level of this error
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            UnbarrelError::Config { .. }
            | UnbarrelError::ConfigNotFound { .. }
            | UnbarrelError::ConfigRead { .. }
            | UnbarrelError::ConfigParse { .. }
            | UnbarrelError::StdoutWrite { .. } => ErrorSeverity::Critical,
            _ => ErrorSeverity::Error,
        }
    }

    /// Check if this is a critical error
    pub fn is_critical(&self) -> bool {
        self.severity() == ErrorSeverity::Critical
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            UnbarrelError::UnresolvedModule { specifier, from } => {
                format!(
                    "Could not resolve module '{}' imported from '{}'.",
                    specifier,
                    from.display()
                )
            }
            UnbarrelError::UnresolvedExport { module, names } => {
                format!(
                    "'{}' exports {} but no matching import or declaration was found.",
                    module.display(),
                    names.join(", ")
                )
            }
            UnbarrelError::AmbiguousReExport { module, name, chain } => {
                format!(
                    "Re-export of '{}' in '{}' never reaches a definition: {}",
                    name,
                    module.display(),
                    chain.join(" -> ")
                )
            }
            UnbarrelError::InvalidPath { path } => {
                format!("Invalid path: '{}'. Please provide an existing file.", path.display())
            }
            UnbarrelError::ConfigNotFound { path } => {
                format!(
                    "Configuration file not found at '{}'. Create one with `init` or drop --config.",
                    path.display()
                )
            }
            _ => self.to_string(),
        }
    }

    /// Suggested fix for the error, if one applies
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            UnbarrelError::Parse { .. } => Some("Fix the syntax error; the file was not modified"),
            UnbarrelError::UnresolvedModule { .. } => {
                Some("Check the specifier spelling and the configured extensions")
            }
            UnbarrelError::UnresolvedExport { .. } => {
                Some("Export only names that are imported or declared in the module")
            }
            UnbarrelError::AmbiguousReExport { .. } => {
                Some("Break the cycle so the name is re-exported from its defining module")
            }
            UnbarrelError::ConfigParse { .. } => Some("Check the TOML syntax of the configuration file"),
            _ => None,
        }
    }

    /// Create an IO error
    pub fn io_error(source: std::io::Error) -> Self {
        UnbarrelError::Io { source }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        UnbarrelError::Config {
            message: message.into(),
        }
    }

    /// Create an unsupported-construct error
    pub fn unsupported(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        UnbarrelError::UnsupportedConstruct {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for UnbarrelError {
    fn from(err: std::io::Error) -> Self {
        UnbarrelError::io_error(err)
    }
}

impl From<serde_json::Error> for UnbarrelError {
    fn from(err: serde_json::Error) -> Self {
        UnbarrelError::JsonSerialize { source: err }
    }
}

/// Result type alias for barrel-file-utils operations
pub type Result<T> = std::result::Result<T, UnbarrelError>;
