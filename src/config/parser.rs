//! Configuration file parsing utilities

use std::fs;
use std::path::{Path, PathBuf};

use super::file::DEFAULT_CONFIG_FILE;
use crate::error::{Result, UnbarrelError};
use crate::models::config::PartialSettings;

/// Parse a TOML configuration file into PartialSettings
pub fn parse_config_file<P: AsRef<Path>>(path: P) -> Result<PartialSettings> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(UnbarrelError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path).map_err(|e| UnbarrelError::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_config_content(&content, path)
}

/// Parse TOML configuration content into PartialSettings
pub fn parse_config_content<P: AsRef<Path>>(content: &str, path: P) -> Result<PartialSettings> {
    let path = path.as_ref();

    let mut settings: PartialSettings =
        toml::from_str(content).map_err(|e| UnbarrelError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })?;

    validate_partial_settings(&settings, path)?;
    settings.config_file = Some(path.to_path_buf());

    Ok(settings)
}

/// Validate partial settings for obvious errors
pub fn validate_partial_settings<P: AsRef<Path>>(settings: &PartialSettings, path: P) -> Result<()> {
    let path = path.as_ref();

    if settings.max_depth == Some(0) {
        return Err(UnbarrelError::Config {
            message: format!(
                "Invalid max_depth 0 in config file: {}. Must be at least 1.",
                path.display()
            ),
        });
    }

    if let Some(extensions) = &settings.extensions {
        if extensions.is_empty() {
            return Err(UnbarrelError::Config {
                message: format!("Empty extensions list in config file: {}", path.display()),
            });
        }
        if let Some(bad) = extensions.iter().find(|ext| !ext.starts_with('.') || ext.len() < 2) {
            return Err(UnbarrelError::Config {
                message: format!(
                    "Invalid extension '{}' in config file: {}. Extensions start with '.'",
                    bad,
                    path.display()
                ),
            });
        }
    }

    Ok(())
}

/// Candidate config file locations, in lookup order
pub fn default_config_locations() -> Vec<PathBuf> {
    let mut locations = vec![PathBuf::from(DEFAULT_CONFIG_FILE)];

    if let Some(home_dir) = dirs::home_dir() {
        locations.push(home_dir.join(DEFAULT_CONFIG_FILE));
    }

    if let Some(config_dir) = dirs::config_dir() {
        locations.push(config_dir.join(env!("CARGO_PKG_NAME")).join("config.toml"));
    }

    locations
}

/// Find and load configuration from default locations
pub fn find_default_config() -> Result<Option<PartialSettings>> {
    for location in default_config_locations() {
        if location.is_file() {
            log::debug!("using config file {}", location.display());
            return Ok(Some(parse_config_file(location)?));
        }
    }

    Ok(None)
}

/// Create a default configuration file at the specified path
pub fn create_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(UnbarrelError::io_error)?;
        }
    }

    let default_config = include_str!("default_config.toml");

    fs::write(path, default_config).map_err(|e| UnbarrelError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
