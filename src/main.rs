use barrel_file_utils::{
    cli::{Args, Command},
    error::{ErrorSeverity, UnbarrelError},
};
use clap::Parser;
use std::process;

fn main() {
    // Parse command-line arguments
    let args = Args::parse();

    init_logging(&args);

    let command = Command::from_args(args);

    let exit_code = run_command(command);

    process::exit(exit_code);
}

/// Route `log` output to stderr; `RUST_LOG` takes precedence over the flags
fn init_logging(args: &Args) {
    let level = if args.quiet {
        "error"
    } else if args.verbose {
        "debug"
    } else {
        "warn"
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

/// Run the command with proper error handling
fn run_command(command: Command) -> i32 {
    match command.execute() {
        Ok(code) => code,
        Err(err) => {
            report_error(&err);

            match err.severity() {
                ErrorSeverity::Error => 1,
                ErrorSeverity::Critical => 2,
            }
        }
    }
}

fn report_error(err: &UnbarrelError) {
    eprintln!("Error: {}", err.user_message());

    if let Some(suggestion) = err.suggestion() {
        eprintln!("Suggestion: {}", suggestion);
    }

    log::debug!("{:?}", err);
}
