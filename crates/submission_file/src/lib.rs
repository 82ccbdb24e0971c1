// crates/submission_file/src/lib.rs

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Script students run to zip up their submission.
pub const TEMPLATE: &str = include_str!("../templates/create_submission_zip.py");

/// Name of the script written into the student version.
pub const SUBMISSION_FILE_NAME: &str = "create_submission_zip.py";

/// Placeholder line in [`TEMPLATE`] replaced by the submission patterns.
pub const REPLACE_STRING: &str = "PATTERNS_TO_INCLUDE = []";

/// Renders the submission script. With no patterns the template is returned
/// unchanged and the script zips the whole assignment.
pub fn render_submission_file(patterns: &[String]) -> String {
    if patterns.is_empty() {
        return TEMPLATE.to_string();
    }
    TEMPLATE.replace(
        REPLACE_STRING,
        &format!("PATTERNS_TO_INCLUDE = {}", python_list_literal(patterns)),
    )
}

/// Writes `create_submission_zip.py` into `output_dir`.
pub fn create_submission_file(output_dir: &Path, patterns: &[String]) -> Result<PathBuf> {
    let path = output_dir.join(SUBMISSION_FILE_NAME);
    fs::write(&path, render_submission_file(patterns))
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

/// `['a', 'b']`, with backslashes and single quotes escaped.
fn python_list_literal(items: &[String]) -> String {
    let quoted: Vec<String> = items
        .iter()
        .map(|item| format!("'{}'", item.replace('\\', "\\\\").replace('\'', "\\'")))
        .collect();
    format!("[{}]", quoted.join(", "))
}
