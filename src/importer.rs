//! The per-run loop: discover, transform, insert, archive.

use std::path::Path;

use bson::DateTime;

use crate::archive;
use crate::config::Options;
use crate::discover::discover_stat_files;
use crate::errors::ImportError;
use crate::import::{FileFailure, ImportReport, transform_file};
use crate::store::RecordStore;

pub struct Importer<'a, S: RecordStore> {
    options: &'a Options,
    store: &'a mut S,
}

impl<'a, S: RecordStore> Importer<'a, S> {
    pub fn new(options: &'a Options, store: &'a mut S) -> Self {
        Self { options, store }
    }

    /// Imports every stat file in the import directory, one at a time.
    ///
    /// Failures scoped to one file are recorded in the report and leave that
    /// file in place; the run continues with the next file.
    ///
    /// # Errors
    /// Returns `ArchiveDir` when the archive directory cannot be created,
    /// `Filesystem` when the import directory cannot be listed, or any error
    /// the store reports for which [`ImportError::is_fatal`] holds.
    pub fn run(&mut self) -> Result<ImportReport, ImportError> {
        if !self.options.dry_run {
            archive::ensure_archive_dir(&self.options.archive_dir)?;
        }
        let files = discover_stat_files(&self.options.import_dir, &self.options.extension)?;
        let mut report = ImportReport { files_found: files.len(), ..Default::default() };
        log::info!("Processing stats files: {}", files.len());

        for path in files {
            match self.import_one(&path, &mut report) {
                Ok(()) => report.files_imported += 1,
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    log::error!("skipping {}: {e}", path.display());
                    report.failures.push(FileFailure { path, error: e });
                }
            }
        }

        log::info!(
            "Imported {} of {} files ({} records), {} failed",
            report.files_imported,
            report.files_found,
            report.records_inserted,
            report.files_failed()
        );
        Ok(report)
    }

    fn import_one(&mut self, path: &Path, report: &mut ImportReport) -> Result<(), ImportError> {
        log::debug!("processing stats file {}", path.display());
        let import_time = DateTime::now();
        let records = transform_file(path, import_time)?;
        log::info!("Importing {} records from {}", records.len(), path.display());
        report.records_read += records.len() as u64;
        if self.options.dry_run {
            return Ok(());
        }

        let inserted = if records.is_empty() { 0 } else { self.store.insert_records(&records)? };
        report.records_inserted += inserted;
        if let Err(e) = archive::archive_file(path, &self.options.archive_dir, &self.options.archive_file_prefix) {
            // the batch is already stored; only the move is outstanding
            log::warn!("{} records from {} were inserted but the file was not archived", inserted, path.display());
            return Err(e);
        }
        Ok(())
    }
}
