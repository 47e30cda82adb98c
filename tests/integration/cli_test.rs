//! Command-line parsing and command execution

use super::fixtures::Project;
use barrel_file_utils::cli::{args::OutputFormat, Args, Command, Commands};
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

fn argv(parts: &[&dyn AsRef<std::ffi::OsStr>]) -> Vec<OsString> {
    parts.iter().map(|part| part.as_ref().to_os_string()).collect()
}

#[test]
fn test_cli_args_parsing() {
    let args = Args::parse_from(["barrel-file-utils", "unbarrel", "src/index.ts"]);
    assert_eq!(args.config, None);
    assert_eq!(args.max_depth, None);
    assert!(!args.quiet);
    assert!(!args.verbose);
    assert!(matches!(
        args.command,
        Commands::Unbarrel { ref root_barrel_file, dry_run: false }
            if root_barrel_file == &PathBuf::from("src/index.ts")
    ));

    let args = Args::parse_from([
        "barrel-file-utils",
        "--max-depth",
        "5",
        "--verbose",
        "check",
        "src/index.ts",
        "--output",
        "json",
    ]);
    assert_eq!(args.max_depth, Some(5));
    assert!(args.verbose);
    assert!(matches!(
        args.command,
        Commands::Check { output: Some(OutputFormat::Json), .. }
    ));
}

#[test]
fn test_cli_rejects_unknown_quote_style() {
    let result = Args::try_parse_from([
        "barrel-file-utils",
        "--quote-style",
        "backtick",
        "unbarrel",
        "index.ts",
    ]);
    assert!(result.is_err());
}

#[test]
fn test_unbarrel_command_rewrites_file() {
    let project = Project::new(&[
        ("index.ts", "export * from './math';"),
        ("math/index.ts", "export * from './add';"),
        ("math/add.ts", "export const add = 1;"),
    ]);
    let index = project.path("index.ts");

    let args = Args::parse_from(argv(&[&"barrel-file-utils", &"--quiet", &"unbarrel", &index]));
    let code = Command::from_args(args).execute().unwrap();

    assert_eq!(code, 0);
    assert_eq!(project.read("index.ts"), "export { add } from './math/add';");
}

#[test]
fn test_unbarrel_command_dry_run() {
    let project = Project::new(&[
        ("index.ts", "export * from './add';"),
        ("add.ts", "export const add = 1;"),
    ]);
    let index = project.path("index.ts");

    let args = Args::parse_from(argv(&[&"barrel-file-utils", &"unbarrel", &index, &"--dry-run"]));
    let code = Command::from_args(args).execute().unwrap();

    assert_eq!(code, 0);
    assert_eq!(project.read("index.ts"), "export * from './add';");
}

#[test]
fn test_check_command_exit_codes() {
    let project = Project::new(&[
        ("index.ts", "export * from './add';"),
        ("flat.ts", "export { add } from './add';"),
        ("add.ts", "export const add = 1;"),
    ]);
    let report = project.path("report.txt");

    let args = Args::parse_from(argv(&[
        &"barrel-file-utils",
        &"check",
        &project.path("index.ts"),
        &"--output-file",
        &report,
    ]));
    assert_eq!(Command::from_args(args).execute().unwrap(), 1);
    assert!(project.read("report.txt").contains("export * from './add'"));

    let args = Args::parse_from(argv(&[
        &"barrel-file-utils",
        &"check",
        &project.path("flat.ts"),
        &"--output-file",
        &report,
    ]));
    assert_eq!(Command::from_args(args).execute().unwrap(), 0);
    assert!(project.read("report.txt").starts_with("No barrel file issues"));
}

#[test]
fn test_explicit_config_file_is_used() {
    let project = Project::new(&[
        ("index.ts", "export * from './add';"),
        ("add.ts", "export const add = 1;"),
        ("barrel.toml", "quote_style = \"double\"\n"),
    ]);

    let args = Args::parse_from(argv(&[
        &"barrel-file-utils",
        &"--quiet",
        &"--config",
        &project.path("barrel.toml"),
        &"unbarrel",
        &project.path("index.ts"),
    ]));
    Command::from_args(args).execute().unwrap();

    assert_eq!(project.read("index.ts"), "export { add } from \"./add\";");
}

#[test]
fn test_missing_input_is_an_error() {
    let project = Project::new(&[]);

    let args = Args::parse_from(argv(&[
        &"barrel-file-utils",
        &"unbarrel",
        &project.root().join("missing.ts"),
    ]));
    let err = Command::from_args(args).execute().unwrap_err();

    assert!(matches!(err, barrel_file_utils::UnbarrelError::InvalidPath { .. }));
}
