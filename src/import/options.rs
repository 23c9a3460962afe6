use std::path::PathBuf;

use crate::errors::ImportError;

/// A file that was left in the import directory, and why.
#[derive(Debug)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: ImportError,
}

#[derive(Debug, Default)]
pub struct ImportReport {
    pub files_found: usize,
    pub files_imported: usize,
    pub records_read: u64,
    pub records_inserted: u64,
    pub failures: Vec<FileFailure>,
}

impl ImportReport {
    #[must_use]
    pub fn files_failed(&self) -> usize {
        self.failures.len()
    }
}
