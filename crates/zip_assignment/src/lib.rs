// crates/zip_assignment/src/lib.rs

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Zips every file below `dir_path` into `<dir name>.zip`.
///
/// # Arguments
///
/// * `dir_path` - The directory to archive. Entry names are relative to it.
/// * `output_dir` - Where to write the archive. Defaults to the parent of
///   `dir_path`; created if it does not exist.
///
/// # Returns
///
/// The path of the written archive.
pub fn zip_assignment_dir(dir_path: &Path, output_dir: Option<&Path>) -> Result<PathBuf> {
    if !dir_path.is_dir() {
        return Err(anyhow!("{} is not a directory", dir_path.display()));
    }
    let dir_name = dir_path
        .file_name()
        .ok_or_else(|| anyhow!("{} has no directory name", dir_path.display()))?
        .to_string_lossy()
        .into_owned();

    let zip_dir = match output_dir {
        Some(dir) => {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
            dir.to_path_buf()
        }
        None => dir_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default(),
    };
    let zip_path = zip_dir.join(format!("{dir_name}.zip"));

    let file = File::create(&zip_path)
        .with_context(|| format!("Failed to create {}", zip_path.display()))?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for entry in WalkDir::new(dir_path).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to walk {}", dir_path.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        // Skip the archive itself when it is written inside the tree.
        if path == zip_path {
            continue;
        }
        let name = archive_name(dir_path, path)?;
        log::debug!("zipping {name}");
        zip.start_file(name, options)?;
        let mut source = File::open(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        io::copy(&mut source, &mut zip)?;
    }

    zip.finish()?;
    Ok(zip_path)
}

/// `/`-separated path of `path` relative to `root`.
fn archive_name(root: &Path, path: &Path) -> Result<String> {
    let relative = path.strip_prefix(root)?;
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Ok(parts.join("/"))
}
