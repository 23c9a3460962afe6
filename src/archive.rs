//! Relocation of processed stat files.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::errors::ImportError;
use crate::fsutil;

/// Creates the archive directory and its parents if needed.
///
/// # Errors
/// Returns `ImportError::ArchiveDir` if the directory cannot be created.
pub fn ensure_archive_dir(dir: &Path) -> Result<(), ImportError> {
    fsutil::ensure_dir(dir).map_err(|e| {
        ImportError::ArchiveDir(format!("cannot create archive directory {}: {e}", dir.display()))
    })
}

/// `<archive_dir>/<prefix><basename of file>`.
///
/// # Errors
/// Returns `ImportError::Filesystem` if `file` has no file name.
pub fn archive_destination(file: &Path, archive_dir: &Path, prefix: &str) -> Result<PathBuf, ImportError> {
    let name = file
        .file_name()
        .ok_or_else(|| ImportError::Filesystem(format!("{} has no file name", file.display())))?;
    let mut archived = OsString::from(prefix);
    archived.push(name);
    Ok(archive_dir.join(archived))
}

/// Moves `file` into the archive directory under its prefixed name.
///
/// # Errors
/// Returns `ImportError::Filesystem` if the move fails; the source is left in place.
pub fn archive_file(file: &Path, archive_dir: &Path, prefix: &str) -> Result<PathBuf, ImportError> {
    let dest = archive_destination(file, archive_dir, prefix)?;
    fsutil::move_file(file, &dest).map_err(|e| {
        ImportError::Filesystem(format!("cannot move {} to {}: {e}", file.display(), dest.display()))
    })?;
    log::debug!("archived {} to {}", file.display(), dest.display());
    Ok(dest)
}
