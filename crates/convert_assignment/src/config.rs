// crates/convert_assignment/src/config.rs

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use trigger_registry::TriggerRegistry;

/// Environment variable naming a trigger file when `--triggers` is not given.
pub const TRIGGERS_FILE_ENV: &str = "CONVERT_TRIGGERS_FILE";

/// What happens around the per-file conversion of a directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Zip the generated directory.
    pub zip: bool,
    /// Write `create_submission_zip.py` into the generated directory.
    pub submission_file: bool,
    /// Files the submission script should pick up (implies `submission_file`).
    pub submission_patterns: Vec<String>,
    /// Log failing files and carry on instead of stopping at the first one.
    pub keep_going: bool,
}

impl ConvertOptions {
    pub fn writes_submission_file(&self) -> bool {
        self.submission_file || !self.submission_patterns.is_empty()
    }
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            zip: true,
            submission_file: false,
            submission_patterns: Vec::new(),
            keep_going: false,
        }
    }
}

/// Runtime configuration composed from CLI + environment.
#[derive(Clone, Debug, Default)]
pub struct AppConfig {
    pub triggers_file: Option<PathBuf>,
    pub options: ConvertOptions,
    pub verbose: bool,
}

impl AppConfig {
    /// The registry from the configured trigger file, or the built-in one.
    pub fn load_registry(&self) -> Result<TriggerRegistry> {
        match &self.triggers_file {
            Some(path) => {
                log::info!("loading triggers from {}", path.display());
                TriggerRegistry::load_from_path(path)
                    .with_context(|| format!("Failed to load triggers from {}", path.display()))
            }
            None => Ok(TriggerRegistry::builtin()),
        }
    }
}

/// The CLI value when present, otherwise [`TRIGGERS_FILE_ENV`].
pub fn triggers_file_or_env(cli_value: Option<PathBuf>) -> Option<PathBuf> {
    cli_value.or_else(|| {
        env::var_os(TRIGGERS_FILE_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
    })
}
