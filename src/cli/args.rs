//! Command-line argument parsing

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::models::config;

/// barrel-file-utils - flatten barrel modules into direct re-exports
#[derive(Parser, Debug)]
#[command(name = "barrel-file-utils")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Rewrite barrel files so every export points at its defining module")]
#[command(long_about = "barrel-file-utils follows the re-export chains of a TypeScript/JavaScript \
barrel file and rewrites it so each exported name is re-exported directly from the module that \
defines it. The check command reports re-exports that still travel through other barrels.")]
#[command(after_help = "EXAMPLES:

Rewriting:
    # Flatten a barrel file in place
    barrel-file-utils unbarrel src/index.ts

    # Print the flattened file without writing it
    barrel-file-utils unbarrel src/index.ts --dry-run

    # Emit double-quoted specifiers
    barrel-file-utils --quote-style double unbarrel src/index.ts

Checking:
    # List wildcard and barrel-to-barrel re-exports
    barrel-file-utils check src/index.ts

    # Machine-readable report
    barrel-file-utils check src/index.ts --output json

    # Save the report to a file
    barrel-file-utils check src/index.ts --output json --output-file report.json

Configuration:
    # Use a specific configuration file
    barrel-file-utils --config ./barrel.toml unbarrel src/index.ts

    # Create a default .barrelrc.toml in the current directory
    barrel-file-utils init
")]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, value_name = "FILE", help = "Path to configuration file (defaults to .barrelrc.toml in the current directory if not specified)")]
    pub config: Option<PathBuf>,

    /// Maximum re-export chain depth
    #[arg(long, global = true, value_name = "DEPTH", help = "Maximum number of re-export hops to follow before reporting an ambiguous chain")]
    pub max_depth: Option<usize>,

    /// Quote style for rewritten specifiers
    #[arg(long, global = true, value_enum, help = "Quote character for specifiers in rewritten export statements")]
    pub quote_style: Option<QuoteStyle>,

    /// Extensions to probe for extensionless specifiers
    #[arg(long = "extension", global = true, value_name = "EXT", help = "Extension probed for extensionless specifiers, in preference order (can be specified multiple times, e.g., --extension .ts --extension .js)")]
    pub extensions: Vec<String>,

    /// Suppress non-essential output
    #[arg(short, long, global = true, help = "Suppress non-essential output (only errors and reports)")]
    pub quiet: bool,

    /// Show debug information
    #[arg(short, long, global = true, help = "Show debug logging (resolution steps and cache statistics)")]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, help = "Disable colored output")]
    pub no_colors: bool,
}

/// Subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Rewrite a barrel file into direct re-exports
    Unbarrel {
        /// The root barrel file to rewrite
        #[arg(value_name = "FILE")]
        root_barrel_file: PathBuf,

        /// Print the rewritten file instead of writing it
        #[arg(long)]
        dry_run: bool,
    },

    /// Report wildcard and barrel-to-barrel re-exports
    Check {
        /// The barrel file to inspect
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Report format
        #[arg(short, long, value_enum)]
        output: Option<OutputFormat>,

        /// Write the report to a file instead of stdout
        #[arg(long, value_name = "REPORT")]
        output_file: Option<PathBuf>,
    },

    /// Create a default configuration file
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },
}

/// Quote style options for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum QuoteStyle {
    /// Single quotes
    Single,
    /// Double quotes
    Double,
}

impl From<QuoteStyle> for config::QuoteStyle {
    fn from(style: QuoteStyle) -> Self {
        match style {
            QuoteStyle::Single => config::QuoteStyle::Single,
            QuoteStyle::Double => config::QuoteStyle::Double,
        }
    }
}

/// Output format options for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output for programmatic consumption
    Json,
}

impl From<OutputFormat> for config::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => config::OutputFormat::Text,
            OutputFormat::Json => config::OutputFormat::Json,
        }
    }
}
