//! Configuration-related data structures

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Source extensions probed by the path resolver, in preference order
pub const DEFAULT_EXTENSIONS: &[&str] = &[
    ".ts", ".tsx", ".d.ts", ".js", ".jsx", ".mts", ".mjs", ".cts", ".cjs",
];

/// Default bound on re-export chain depth
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Main configuration settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Maximum re-export chain depth before resolution gives up
    pub max_depth: usize,

    /// Quote style for specifiers in rewritten export statements
    pub quote_style: QuoteStyle,

    /// Extensions probed when a specifier has none, in preference order
    pub extensions: Vec<String>,

    /// Output format for check reports
    pub output_format: OutputFormat,

    /// Print the rewritten file instead of writing it
    pub dry_run: bool,

    /// Whether to use colors in text output
    pub use_colors: bool,

    /// Whether to suppress non-essential output
    pub quiet: bool,

    /// Whether to show debug information
    pub verbose: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            quote_style: QuoteStyle::Single,
            extensions: DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
            output_format: OutputFormat::Text,
            dry_run: false,
            use_colors: true,
            quiet: false,
            verbose: false,
        }
    }
}

/// String quote style used when printing specifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStyle {
    Single,
    Double,
}

impl QuoteStyle {
    pub fn is_single(self) -> bool {
        matches!(self, QuoteStyle::Single)
    }
}

impl std::str::FromStr for QuoteStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "single" => Ok(QuoteStyle::Single),
            "double" => Ok(QuoteStyle::Double),
            _ => Err(format!("Invalid quote style: {}", s)),
        }
    }
}

impl std::fmt::Display for QuoteStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuoteStyle::Single => write!(f, "single"),
            QuoteStyle::Double => write!(f, "double"),
        }
    }
}

/// Supported report formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output for programmatic consumption
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Invalid output format: {}", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Partial settings for configuration merging
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PartialSettings {
    pub max_depth: Option<usize>,
    pub quote_style: Option<QuoteStyle>,
    pub extensions: Option<Vec<String>>,
    pub output_format: Option<OutputFormat>,
    pub dry_run: Option<bool>,
    pub use_colors: Option<bool>,
    pub quiet: Option<bool>,
    pub verbose: Option<bool>,
    /// Only meaningful on the command line; never read from files
    #[serde(skip)]
    pub config_file: Option<PathBuf>,
}

impl PartialSettings {
    /// Overwrite every field that `other` sets
    pub fn merge_from(&mut self, other: PartialSettings) {
        if other.max_depth.is_some() {
            self.max_depth = other.max_depth;
        }
        if other.quote_style.is_some() {
            self.quote_style = other.quote_style;
        }
        if other.extensions.is_some() {
            self.extensions = other.extensions;
        }
        if other.output_format.is_some() {
            self.output_format = other.output_format;
        }
        if other.dry_run.is_some() {
            self.dry_run = other.dry_run;
        }
        if other.use_colors.is_some() {
            self.use_colors = other.use_colors;
        }
        if other.quiet.is_some() {
            self.quiet = other.quiet;
        }
        if other.verbose.is_some() {
            self.verbose = other.verbose;
        }
        if other.config_file.is_some() {
            self.config_file = other.config_file;
        }
    }

    /// Fill unset fields from the defaults
    pub fn to_settings(&self) -> Settings {
        let defaults = Settings::default();
        Settings {
            max_depth: self.max_depth.unwrap_or(defaults.max_depth),
            quote_style: self.quote_style.unwrap_or(defaults.quote_style),
            extensions: self.extensions.clone().unwrap_or(defaults.extensions),
            output_format: self.output_format.unwrap_or(defaults.output_format),
            dry_run: self.dry_run.unwrap_or(defaults.dry_run),
            use_colors: self.use_colors.unwrap_or(defaults.use_colors),
            quiet: self.quiet.unwrap_or(defaults.quiet),
            verbose: self.verbose.unwrap_or(defaults.verbose),
        }
    }
}
