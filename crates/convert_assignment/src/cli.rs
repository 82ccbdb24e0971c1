// crates/convert_assignment/src/cli.rs

//! Arguments shared by the `convert_assignment` and `convert_all` binaries.

use std::path::PathBuf;

use clap::{Arg, ArgAction, ArgMatches, Command};

use crate::assignment::ConversionReport;
use crate::config::{triggers_file_or_env, AppConfig, ConvertOptions};

pub fn with_conversion_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("triggers")
                .long("triggers")
                .num_args(1)
                .value_parser(clap::value_parser!(PathBuf))
                .help("TOML file defining codeblock and mask triggers (default: built-in triggers)"),
        )
        .arg(
            Arg::new("no_zip")
                .long("no-zip")
                .help("Do not zip the generated student version")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("submission_file")
                .long("submission-file")
                .help("Write create_submission_zip.py into the student version")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("submission_pattern")
                .long("submission-pattern")
                .action(ArgAction::Append)
                .help("Regex of a file the submission script should include (implies --submission-file)"),
        )
        .arg(
            Arg::new("keep_going")
                .long("keep-going")
                .help("Report files that fail to convert and continue with the rest")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose logging")
                .action(ArgAction::SetTrue),
        )
}

pub fn app_config(matches: &ArgMatches) -> AppConfig {
    let submission_patterns: Vec<String> = matches
        .get_many::<String>("submission_pattern")
        .unwrap_or_default()
        .cloned()
        .collect();

    AppConfig {
        triggers_file: triggers_file_or_env(matches.get_one::<PathBuf>("triggers").cloned()),
        options: ConvertOptions {
            zip: !matches.get_flag("no_zip"),
            submission_file: matches.get_flag("submission_file"),
            submission_patterns,
            keep_going: matches.get_flag("keep_going"),
        },
        verbose: matches.get_flag("verbose"),
    }
}

/// Prints the per-run summary to stdout.
pub fn print_report(report: &ConversionReport) {
    println!("Student version: {}", report.generation_location.display());
    println!(
        "- {} converted, {} copied, {} skipped",
        report.converted, report.copied, report.skipped
    );
    if let Some(zip_path) = &report.zip_path {
        println!("- Zipped to {}", zip_path.display());
    }
    for (path, reason) in &report.failed {
        println!("- FAILED {}: {}", path.display(), reason);
    }
}
