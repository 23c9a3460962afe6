use bson::Document;

use super::RecordStore;
use crate::errors::ImportError;

/// Keeps inserted records in memory. Backs dry runs and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Vec<Document>,
    batches: usize,
    closed: bool,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn records(&self) -> &[Document] {
        &self.records
    }

    /// Number of non-empty batches received.
    #[must_use]
    pub fn batches(&self) -> usize {
        self.batches
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl RecordStore for MemoryStore {
    fn insert_records(&mut self, records: &[Document]) -> Result<u64, ImportError> {
        if self.closed {
            return Err(ImportError::Insert("store is closed".to_string()));
        }
        if records.is_empty() {
            return Ok(0);
        }
        self.records.extend_from_slice(records);
        self.batches += 1;
        Ok(records.len() as u64)
    }

    fn close(&mut self) {
        self.closed = true;
    }
}
