// crates/convert_all/src/main.rs

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Arg, Command};

use convert_assignment::cli::{app_config, with_conversion_args};
use convert_assignment::logging::init_logging;
use convert_assignment::{AssignmentConverter, DefaultFileConverter};

const DEFAULT_ASSIGNMENTS_DIR: &str = "assignments";

fn main() -> Result<()> {
    let command = Command::new("convert_all")
        .version("0.1.0")
        .about("Generates the student version of every assignment in a folder")
        .arg(
            Arg::new("assignments_dir")
                .value_parser(clap::value_parser!(PathBuf))
                .default_value(DEFAULT_ASSIGNMENTS_DIR)
                .help("Folder whose subdirectories are assignments"),
        );
    let matches = with_conversion_args(command).get_matches();

    let config = app_config(&matches);
    init_logging(config.verbose);

    let assignments_dir = matches
        .get_one::<PathBuf>("assignments_dir")
        .cloned()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_ASSIGNMENTS_DIR));

    println!("Converting all assignments...");
    fs::create_dir_all(&assignments_dir)
        .with_context(|| format!("Failed to create {}", assignments_dir.display()))?;

    let registry = config.load_registry()?;
    let file_converter = DefaultFileConverter::new(&registry);
    let converter = AssignmentConverter::new(&file_converter, &config.options);

    let mut failed = Vec::new();
    for assignment in assignment_dirs(&assignments_dir)? {
        let name = assignment
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        match converter.convert(&assignment) {
            Ok(report) if report.is_success() => println!("- Converted {name}"),
            Ok(report) => {
                for (path, reason) in &report.failed {
                    println!("- FAILED {}: {}", path.display(), reason);
                }
                failed.push(name);
            }
            Err(err) if config.options.keep_going => {
                log::error!("{err:#}");
                println!("- FAILED {name}: {err:#}");
                failed.push(name);
            }
            Err(err) => return Err(err.context(format!("Failed to convert {name}"))),
        }
    }

    if !failed.is_empty() {
        bail!("{} assignment(s) failed to convert: {}", failed.len(), failed.join(", "));
    }
    println!("- All assignments converted.");
    Ok(())
}

/// Direct subdirectories of `dir`, sorted by name.
fn assignment_dirs(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))? {
        let path = entry?.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort();
    Ok(dirs)
}
