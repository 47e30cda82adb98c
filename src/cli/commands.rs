//! Command implementations

use std::path::PathBuf;

use super::args::{Args, Commands};
use crate::config::{self, cli::CliConfig, DEFAULT_CONFIG_FILE};
use crate::core::Unbarreler;
use crate::error::Result;
use crate::models::config::Settings;
use crate::output::{create_formatter, create_writer};

/// Available commands
#[derive(Debug)]
pub enum Command {
    /// Rewrite a barrel file in place
    Unbarrel { file: PathBuf, cli: CliConfig },
    /// Report barrel issues of a file
    Check {
        file: PathBuf,
        output_file: Option<PathBuf>,
        cli: CliConfig,
    },
    /// Initialize a default configuration file
    Init { force: bool },
}

impl Command {
    /// Create a command from parsed arguments
    pub fn from_args(args: Args) -> Self {
        let cli = CliConfig::from_args(&args);
        match args.command {
            Commands::Unbarrel {
                root_barrel_file, ..
            } => Command::Unbarrel {
                file: root_barrel_file,
                cli,
            },
            Commands::Check {
                file, output_file, ..
            } => Command::Check {
                file,
                output_file,
                cli,
            },
            Commands::Init { force } => Command::Init { force },
        }
    }

    /// Execute the command, returning the process exit code
    pub fn execute(self) -> Result<i32> {
        match self {
            Command::Unbarrel { file, cli } => {
                let settings = load_settings(cli)?;
                let outcome = Unbarreler::new(settings.clone()).run(&file)?;

                if settings.dry_run {
                    create_writer(None::<PathBuf>).write(&format!("{}\n", outcome.rewritten))?;
                } else if !settings.quiet {
                    let verb = if outcome.changed() { "Rewrote" } else { "Unchanged" };
                    println!(
                        "{} {} ({} export{})",
                        verb,
                        outcome.path.display(),
                        outcome.exports,
                        if outcome.exports == 1 { "" } else { "s" }
                    );
                }

                Ok(0)
            }
            Command::Check {
                file,
                output_file,
                cli,
            } => {
                let settings = load_settings(cli)?;
                let report = Unbarreler::new(settings.clone()).check(&file)?;

                let formatter = create_formatter(
                    &settings.output_format,
                    settings.use_colors && output_file.is_none(),
                    settings.verbose,
                    settings.quiet,
                );
                create_writer(output_file.as_ref()).write(&formatter.format(&report)?)?;

                Ok(if report.has_issues() { 1 } else { 0 })
            }
            Command::Init { force } => {
                let config_path = PathBuf::from(DEFAULT_CONFIG_FILE);

                if config_path.exists() && !force {
                    println!("Configuration file already exists at: {}", config_path.display());
                    println!("To overwrite it, run this command again with --force.");
                    return Ok(0);
                }

                config::create_default_config(&config_path)?;

                println!("Created default configuration file at: {}", config_path.display());
                println!("\nAvailable options:");
                println!("  - max_depth: Maximum re-export hops before giving up");
                println!("  - quote_style: Quote style for rewritten specifiers (single, double)");
                println!("  - extensions: Extensions probed for extensionless specifiers");
                println!("  - output_format: Check report format (text, json)");
                println!("  - use_colors: Colored text output");

                Ok(0)
            }
        }
    }
}

fn load_settings(cli: CliConfig) -> Result<Settings> {
    let settings = config::load_config(cli.into_args())?;
    log::debug!("settings: {:?}", settings);
    Ok(settings)
}
