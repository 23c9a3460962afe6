//! Locates stat files waiting in the import directory.

use std::io;
use std::path::{Path, PathBuf};

use crate::errors::ImportError;

/// Lists regular files directly inside `dir` whose name ends with `extension`,
/// the equivalent of the shell pattern `<dir>/*<extension>`.
///
/// Hidden files are skipped like a shell glob would. The result is sorted by
/// file name; a missing directory yields an empty list.
///
/// # Errors
/// Returns `ImportError::Filesystem` if the directory exists but cannot be read.
pub fn discover_stat_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, ImportError> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("import directory {} does not exist", dir.display());
            return Ok(Vec::new());
        }
        Err(e) => {
            return Err(ImportError::Filesystem(format!("cannot read {}: {e}", dir.display())));
        }
    };
    let mut files = Vec::new();
    for entry in entries {
        let entry =
            entry.map_err(|e| ImportError::Filesystem(format!("cannot read {}: {e}", dir.display())))?;
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name.starts_with('.') || !name.ends_with(extension) {
            continue;
        }
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    log::debug!("discovered {} stat files in {}", files.len(), dir.display());
    Ok(files)
}
