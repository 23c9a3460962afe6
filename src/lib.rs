//! Batch importer for gzip-compressed JSON client stat files.
//!
//! Files matching `<import-dir>/*<extension>` are decompressed, their records'
//! timestamps normalized, the records bulk-inserted into MongoDB, and each
//! successfully imported file moved to the archive directory.

pub mod archive;
pub mod config;
pub mod discover;
pub mod errors;
pub mod fsutil;
pub mod import;
pub mod importer;
pub mod logger;
pub mod store;

#[cfg(test)]
mod test_support;

use crate::config::{MongoOptions, Options};
use crate::errors::ImportError;
use crate::import::ImportReport;
use crate::importer::Importer;
use crate::store::{MemoryStore, MongoStore, RecordStore};

/// Runs one import with the resolved options.
///
/// Dry runs never connect to the database. Otherwise the connection is
/// opened (and authenticated) before any file is touched and closed once all
/// files are processed.
///
/// # Errors
/// Returns fatal errors only: connection, authentication, archive directory,
/// or import directory failures. Per-file failures are in the report.
pub fn run(options: &Options) -> Result<ImportReport, ImportError> {
    if options.dry_run {
        let mut store = MemoryStore::new();
        return run_with_store(options, &mut store);
    }
    run_connected(options, MongoStore::connect)
}

/// Opens a store with `connect`, then runs the import against it. Nothing
/// on disk is touched when `connect` fails.
///
/// # Errors
/// See [`run`].
pub fn run_connected<S, F>(options: &Options, connect: F) -> Result<ImportReport, ImportError>
where
    S: RecordStore,
    F: FnOnce(&MongoOptions) -> Result<S, ImportError>,
{
    let mut store = connect(&options.mongo)?;
    run_with_store(options, &mut store)
}

/// Runs one import against an already-open store, closing it afterwards.
///
/// # Errors
/// See [`run`].
pub fn run_with_store<S: RecordStore>(options: &Options, store: &mut S) -> Result<ImportReport, ImportError> {
    let result = Importer::new(options, store).run();
    store.close();
    result
}
