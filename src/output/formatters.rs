//! Output formatting functionality
//!
//! Rendering helpers for check reports.

use crate::error::{Result, UnbarrelError};
use crate::models::issues::{BarrelIssue, CheckReport};
use ansi_term::Colour::{Cyan, Green, Red, Yellow};
use ansi_term::Style;

/// Format a single issue as one text line
pub fn format_issue_text(issue: &BarrelIssue, use_colors: bool) -> String {
    match issue {
        BarrelIssue::ExportAll { specifier, .. } => {
            let label = "export-all";
            let specifier = format!("'{}'", specifier);
            if use_colors {
                format!(
                    "  {} export * from {}",
                    Yellow.bold().paint(label),
                    Cyan.paint(specifier)
                )
            } else {
                format!("  {} export * from {}", label, specifier)
            }
        }
        BarrelIssue::BarrelFileReference {
            exported_name,
            barrel_file_path,
        } => {
            let label = "barrel-reference";
            if use_colors {
                format!(
                    "  {} {} is re-exported through {}",
                    Red.bold().paint(label),
                    Style::new().bold().paint(exported_name),
                    Cyan.paint(barrel_file_path)
                )
            } else {
                format!(
                    "  {} {} is re-exported through {}",
                    label, exported_name, barrel_file_path
                )
            }
        }
    }
}

/// Format a check report as text
pub fn format_report_text(report: &CheckReport, use_colors: bool, verbose: bool) -> String {
    let mut output = String::new();
    let file = report.file.display().to_string();

    if !report.has_issues() {
        let message = format!("No barrel file issues in {}", file);
        if use_colors {
            output.push_str(&Green.paint(message).to_string());
        } else {
            output.push_str(&message);
        }
        output.push('\n');
        return output;
    }

    let heading = format!(
        "{} barrel file issue{} in {}",
        report.issues.len(),
        if report.issues.len() == 1 { "" } else { "s" },
        file
    );
    if use_colors {
        output.push_str(&Style::new().bold().paint(heading).to_string());
    } else {
        output.push_str(&heading);
    }
    output.push('\n');

    for issue in &report.issues {
        output.push_str(&format_issue_text(issue, use_colors));
        output.push('\n');
    }

    if verbose {
        let wildcards = report
            .issues
            .iter()
            .filter(|issue| matches!(issue, BarrelIssue::ExportAll { .. }))
            .count();
        output.push_str(&format!(
            "\nWildcard re-exports: {}\nBarrel references: {}\n",
            wildcards,
            report.issues.len() - wildcards
        ));
    }

    output
}

/// Format a check report as pretty-printed JSON
pub fn format_report_json(report: &CheckReport) -> Result<String> {
    let mut json = serde_json::to_string_pretty(report)
        .map_err(|e| UnbarrelError::JsonSerialize { source: e })?;
    json.push('\n');
    Ok(json)
}
