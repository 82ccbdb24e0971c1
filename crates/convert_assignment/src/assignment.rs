// crates/convert_assignment/src/assignment.rs

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use trigger_registry::TriggerRegistry;
use walkdir::WalkDir;

use crate::config::ConvertOptions;
use crate::file_converter::{
    convert_file_with_converter, DefaultFileConverter, FileConverter, FileOutcome,
};

/// Name of the directory the student version is generated into.
pub const GENERATED_LOCATION_NAME: &str = "STUDENT_VERSION";

/// Path fragments that are never carried into the student version.
const EXCLUDED_FRAGMENTS: &[&str] = &["__pycache__", ".pyc", ".DS_Store"];

/// Outcome of converting one assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    pub generation_location: PathBuf,
    pub converted: usize,
    pub copied: usize,
    pub skipped: usize,
    /// Files that failed under `keep_going`, with the rendered error.
    pub failed: Vec<(PathBuf, String)>,
    pub zip_path: Option<PathBuf>,
}

impl ConversionReport {
    fn new(generation_location: PathBuf) -> Self {
        Self {
            generation_location,
            converted: 0,
            copied: 0,
            skipped: 0,
            failed: Vec::new(),
            zip_path: None,
        }
    }

    fn record(&mut self, outcome: FileOutcome) {
        match outcome {
            FileOutcome::Converted => self.converted += 1,
            FileOutcome::Copied => self.copied += 1,
            FileOutcome::Skipped => self.skipped += 1,
        }
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Walks a solution file or directory and writes its student version.
pub struct AssignmentConverter<'a> {
    file_converter: &'a dyn FileConverter,
    options: &'a ConvertOptions,
}

impl<'a> AssignmentConverter<'a> {
    pub fn new(file_converter: &'a dyn FileConverter, options: &'a ConvertOptions) -> Self {
        Self {
            file_converter,
            options,
        }
    }

    /// Converts `source` into a fresh `STUDENT_VERSION` directory.
    ///
    /// A file is converted next to itself (`<parent>/STUDENT_VERSION/<file>`).
    /// A directory is converted into `<dir>/STUDENT_VERSION/<dir name>/...`
    /// and then zipped to `<dir>/STUDENT_VERSION/<dir name>.zip`.
    pub fn convert(&self, source: &Path) -> Result<ConversionReport> {
        let source = fs::canonicalize(source)
            .with_context(|| format!("The source file/folder {} does not exist.", source.display()))?;
        if is_excluded(&source) {
            log::info!("{} is excluded from conversion", source.display());
            return Ok(ConversionReport::new(generation_location_for(&source)?));
        }

        let generation_location = prepare_generation_location(&source)?;
        let mut report = ConversionReport::new(generation_location.clone());

        if source.is_file() {
            self.convert_one(&source, &generation_location, &mut report)?;
            return Ok(report);
        }

        let dir_name = source
            .file_name()
            .ok_or_else(|| anyhow!("{} has no directory name", source.display()))?;
        let output_root = generation_location.join(dir_name);

        let walker = WalkDir::new(&source)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.path() != generation_location && !is_excluded(entry.path()));

        for entry in walker {
            let entry = entry.with_context(|| format!("Failed to walk {}", source.display()))?;
            let relative = entry.path().strip_prefix(&source)?;

            if entry.file_type().is_dir() {
                let destination = output_root.join(relative);
                fs::create_dir_all(&destination)
                    .with_context(|| format!("Failed to create {}", destination.display()))?;
            } else if entry.file_type().is_file() {
                let destination_dir = match relative.parent() {
                    Some(parent) => output_root.join(parent),
                    None => output_root.clone(),
                };
                self.convert_one(entry.path(), &destination_dir, &mut report)?;
            }
        }

        if self.options.writes_submission_file() {
            let path = submission_file::create_submission_file(&output_root, &self.options.submission_patterns)?;
            log::info!("wrote {}", path.display());
        }

        if self.options.zip {
            report.zip_path = Some(zip_assignment::zip_assignment_dir(&output_root, None)?);
        }

        Ok(report)
    }

    fn convert_one(&self, source: &Path, destination_dir: &Path, report: &mut ConversionReport) -> Result<()> {
        match convert_file_with_converter(self.file_converter, source, destination_dir) {
            Ok(outcome) => {
                log::info!("{outcome:?}: {}", source.display());
                report.record(outcome);
                Ok(())
            }
            Err(err) if self.options.keep_going => {
                log::error!("{err:#}");
                report.failed.push((source.to_path_buf(), format!("{err:#}")));
                Ok(())
            }
            Err(err) => Err(err),
        }
    }
}

/// Converts `source` with the default file converter.
pub fn convert_assignment(
    registry: &TriggerRegistry,
    source: &Path,
    options: &ConvertOptions,
) -> Result<ConversionReport> {
    let file_converter = DefaultFileConverter::new(registry);
    AssignmentConverter::new(&file_converter, options).convert(source)
}

/// Creates an empty `STUDENT_VERSION` directory for `source`, replacing any
/// previous one.
pub fn prepare_generation_location(source: &Path) -> Result<PathBuf> {
    let generation_location = generation_location_for(source)?;
    if generation_location.exists() {
        fs::remove_dir_all(&generation_location)
            .with_context(|| format!("Failed to remove {}", generation_location.display()))?;
    }
    fs::create_dir_all(&generation_location)
        .with_context(|| format!("Failed to create {}", generation_location.display()))?;
    Ok(generation_location)
}

/// `<dir>/STUDENT_VERSION` for a directory, `<parent>/STUDENT_VERSION` for a file.
fn generation_location_for(source: &Path) -> Result<PathBuf> {
    let base = if source.is_file() {
        source
            .parent()
            .ok_or_else(|| anyhow!("{} has no parent directory", source.display()))?
    } else if source.is_dir() {
        source
    } else {
        return Err(anyhow!("The source file/folder {} does not exist.", source.display()));
    };
    Ok(base.join(GENERATED_LOCATION_NAME))
}

fn is_excluded(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy())
        .map(|name| EXCLUDED_FRAGMENTS.iter().any(|fragment| name.contains(fragment)))
        .unwrap_or(false)
}
