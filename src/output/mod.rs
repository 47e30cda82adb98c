//! Output formatting and writing functionality

mod formatters;
mod writers;

pub use self::formatters::format_issue_text;
pub use self::writers::{create_writer, FileWriter, OutputWriter, StdoutWriter};

use crate::error::Result;
use crate::models::config::OutputFormat;
use crate::models::issues::CheckReport;

/// Trait for different output formatters
pub trait Formatter {
    /// Format a check report into a string
    fn format(&self, report: &CheckReport) -> Result<String>;
}

/// Text formatter for human-readable output
pub struct TextFormatter {
    pub use_colors: bool,
    pub verbose: bool,
    pub quiet: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(use_colors: bool, verbose: bool, quiet: bool) -> Self {
        Self {
            use_colors,
            verbose,
            quiet,
        }
    }
}

impl Formatter for TextFormatter {
    fn format(&self, report: &CheckReport) -> Result<String> {
        // Quiet mode drops the clean-file line and the heading
        if self.quiet {
            return Ok(report
                .issues
                .iter()
                .map(|issue| format!("{}\n", formatters::format_issue_text(issue, self.use_colors)))
                .collect());
        }

        Ok(formatters::format_report_text(
            report,
            self.use_colors,
            self.verbose,
        ))
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format(&self, report: &CheckReport) -> Result<String> {
        formatters::format_report_json(report)
    }
}

/// Create a formatter based on the output format
pub fn create_formatter(
    format: &OutputFormat,
    use_colors: bool,
    verbose: bool,
    quiet: bool,
) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(use_colors, verbose, quiet)),
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}
