// crates/convert_assignment/src/main.rs

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Arg, Command};

use convert_assignment::cli::{app_config, print_report, with_conversion_args};
use convert_assignment::logging::init_logging;
use convert_assignment::{AssignmentConverter, DefaultFileConverter};

fn main() -> Result<()> {
    let command = Command::new("convert_assignment")
        .version("0.1.0")
        .about("Generates the student version of a solution file or directory")
        .arg(
            Arg::new("source")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf))
                .help("The solution file or directory to convert"),
        );
    let matches = with_conversion_args(command).get_matches();

    let config = app_config(&matches);
    init_logging(config.verbose);

    let source = matches
        .get_one::<PathBuf>("source")
        .cloned()
        .unwrap_or_default();
    let registry = config.load_registry()?;
    let file_converter = DefaultFileConverter::new(&registry);
    let report = AssignmentConverter::new(&file_converter, &config.options).convert(&source)?;

    print_report(&report);
    if !report.is_success() {
        bail!("{} file(s) failed to convert", report.failed.len());
    }
    Ok(())
}
