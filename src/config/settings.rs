//! Settings validation

use crate::error::{Result, UnbarrelError};
use crate::models::config::Settings;

/// Settings validator for ensuring configuration is valid
pub struct SettingsValidator;

impl SettingsValidator {
    /// Validate settings and return errors if invalid
    pub fn validate(settings: &Settings) -> Result<()> {
        if settings.max_depth == 0 {
            return Err(UnbarrelError::config_error("Max depth must be at least 1"));
        }

        if settings.extensions.is_empty() {
            return Err(UnbarrelError::config_error(
                "At least one source extension is required",
            ));
        }

        for ext in &settings.extensions {
            Self::validate_extension(ext)?;
        }

        if settings.quiet && settings.verbose {
            log::debug!("both quiet and verbose requested, quiet wins for output");
        }

        Ok(())
    }

    fn validate_extension(ext: &str) -> Result<()> {
        let body = ext.strip_prefix('.').unwrap_or("");
        if body.is_empty() || body.contains(['/', '\\']) || body.ends_with('.') {
            return Err(UnbarrelError::config_error(format!(
                "Invalid extension '{}': expected a form like '.ts'",
                ext
            )));
        }
        Ok(())
    }
}
