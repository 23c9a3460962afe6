//! Destinations for transformed records.

mod memory;
mod mongo;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

use bson::Document;

use crate::errors::ImportError;

pub trait RecordStore {
    /// Inserts one file's records as a single batch and returns how many were stored.
    ///
    /// Callers treat the batch as all-or-nothing: on `Err` the source file is
    /// not archived.
    ///
    /// # Errors
    /// Returns `ImportError::Insert` when the backend rejects the batch.
    fn insert_records(&mut self, records: &[Document]) -> Result<u64, ImportError>;

    /// Releases the backend connection. Further inserts fail.
    fn close(&mut self);
}
