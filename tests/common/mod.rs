#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use bson::Document;
use flate2::Compression;
use flate2::write::GzEncoder;
use svm_stats_import::config::Options;
use svm_stats_import::errors::ImportError;
use svm_stats_import::store::RecordStore;

pub fn write_gz(dir: &Path, name: &str, payload: &[u8]) -> PathBuf {
    let path = dir.join(name);
    let mut encoder = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
    encoder.write_all(payload).unwrap();
    encoder.finish().unwrap();
    path
}

/// Default options rooted in `dir`: imports from `dir`, archives to `dir/ARCHIVE`.
pub fn options_in(dir: &Path) -> Options {
    Options { import_dir: dir.to_path_buf(), archive_dir: dir.join("ARCHIVE"), ..Options::default() }
}

/// A store that rejects every batch with the given error.
pub struct RejectingStore {
    pub fatal: bool,
    pub attempts: usize,
    pub closed: bool,
}

impl RejectingStore {
    pub fn new(fatal: bool) -> Self {
        Self { fatal, attempts: 0, closed: false }
    }
}

impl RecordStore for RejectingStore {
    fn insert_records(&mut self, _records: &[Document]) -> Result<u64, ImportError> {
        self.attempts += 1;
        if self.fatal {
            Err(ImportError::Connection("server went away".into()))
        } else {
            Err(ImportError::Insert("duplicate key".into()))
        }
    }

    fn close(&mut self) {
        self.closed = true;
    }
}
