//! Command-line argument configuration source

use std::path::PathBuf;

use super::ConfigSource;
use crate::cli::args::{Args, Commands};
use crate::error::Result;
use crate::models::config::{OutputFormat, PartialSettings, QuoteStyle};

/// Settings-relevant subset of the command line
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub config: Option<PathBuf>,
    pub max_depth: Option<usize>,
    pub quote_style: Option<QuoteStyle>,
    pub extensions: Option<Vec<String>>,
    pub output_format: Option<OutputFormat>,
    pub dry_run: bool,
    pub quiet: bool,
    pub verbose: bool,
    pub no_colors: bool,
}

/// Command-line argument configuration source
#[derive(Debug)]
pub struct CliConfig {
    args: CliArgs,
    name: String,
}

impl CliConfig {
    /// Create a new CLI configuration source
    pub fn new(args: CliArgs) -> Self {
        Self {
            args,
            name: "command line arguments".to_string(),
        }
    }

    /// Create from clap-parsed arguments
    pub fn from_args(args: &Args) -> Self {
        let mut cli_args = CliArgs {
            config: args.config.clone(),
            max_depth: args.max_depth,
            quote_style: args.quote_style.map(Into::into),
            extensions: (!args.extensions.is_empty()).then(|| args.extensions.clone()),
            quiet: args.quiet,
            verbose: args.verbose,
            no_colors: args.no_colors,
            ..Default::default()
        };

        match &args.command {
            Commands::Unbarrel { dry_run, .. } => cli_args.dry_run = *dry_run,
            Commands::Check { output, .. } => cli_args.output_format = output.map(Into::into),
            Commands::Init { .. } => {}
        }

        Self::new(cli_args)
    }

    /// Get the config file path if specified
    pub fn config_path(&self) -> Option<&PathBuf> {
        self.args.config.as_ref()
    }

    /// Consume the source, returning the captured arguments
    pub fn into_args(self) -> CliArgs {
        self.args
    }
}

impl ConfigSource for CliConfig {
    fn load(&self) -> Result<PartialSettings> {
        let mut settings = PartialSettings {
            max_depth: self.args.max_depth,
            quote_style: self.args.quote_style,
            extensions: self.args.extensions.clone(),
            output_format: self.args.output_format,
            ..Default::default()
        };

        // Flags only ever switch behavior on, so an absent flag must not
        // override a value from the file or environment.
        if self.args.dry_run {
            settings.dry_run = Some(true);
        }
        if self.args.quiet {
            settings.quiet = Some(true);
        }
        if self.args.verbose {
            settings.verbose = Some(true);
        }
        if self.args.no_colors {
            settings.use_colors = Some(false);
        }

        Ok(settings)
    }

    fn is_available(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        &self.name
    }
}
