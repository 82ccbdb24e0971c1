// crates/convert_assignment/src/file_converter.rs

use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use line_converter::LineConverter;
use notebook_filter::convert_notebook;
use trigger_registry::TriggerRegistry;

/// Copied unchanged; never run through the line converter.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "tiff"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// Written after running through the converter.
    Converted,
    /// Copied byte-for-byte.
    Copied,
    /// Not valid UTF-8; nothing written.
    Skipped,
}

/// Trait that abstracts converting a single file into the student version.
pub trait FileConverter {
    /// Writes the student version of `source` into `destination_dir` under
    /// the same file name.
    fn convert_file(&self, source: &Path, destination_dir: &Path) -> Result<FileOutcome>;
}

/// Dispatches on the file extension: notebooks are filtered cell by cell,
/// images are copied, everything else goes through the line converter.
pub struct DefaultFileConverter<'r> {
    registry: &'r TriggerRegistry,
}

impl<'r> DefaultFileConverter<'r> {
    pub fn new(registry: &'r TriggerRegistry) -> Self {
        Self { registry }
    }
}

impl FileConverter for DefaultFileConverter<'_> {
    fn convert_file(&self, source: &Path, destination_dir: &Path) -> Result<FileOutcome> {
        let file_name = source
            .file_name()
            .ok_or_else(|| anyhow!("{} has no file name", source.display()))?;
        fs::create_dir_all(destination_dir)
            .with_context(|| format!("Failed to create {}", destination_dir.display()))?;
        let destination = destination_dir.join(file_name);

        let extension = source
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        if IMAGE_EXTENSIONS.contains(&extension.as_str()) {
            fs::copy(source, &destination)
                .with_context(|| format!("Failed to copy {}", source.display()))?;
            return Ok(FileOutcome::Copied);
        }

        let bytes = fs::read(source).with_context(|| format!("Failed to read {}", source.display()))?;
        let Ok(text) = String::from_utf8(bytes) else {
            log::warn!("Could not read file: {}. Skipping.", source.display());
            return Ok(FileOutcome::Skipped);
        };

        let converted = if extension == "ipynb" {
            convert_notebook(self.registry, &text)
                .with_context(|| format!("Failed to convert notebook {}", source.display()))?
        } else {
            LineConverter::new(self.registry)
                .convert_text(&text)
                .with_context(|| format!("Failed to convert {}", source.display()))?
        };

        fs::write(&destination, converted)
            .with_context(|| format!("Failed to write {}", destination.display()))?;
        log::debug!("converted {} -> {}", source.display(), destination.display());
        Ok(FileOutcome::Converted)
    }
}

/// Public API function to convert a file using a provided `FileConverter`.
pub fn convert_file_with_converter(
    converter: &dyn FileConverter,
    source: &Path,
    destination_dir: &Path,
) -> Result<FileOutcome> {
    converter.convert_file(source, destination_dir)
}
