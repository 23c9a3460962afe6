use std::path::Path;

use bson::{DateTime, Document};
use serde_json::Value;

use super::gzip::read_gzip_payload;
use super::timestamp::normalize_timestamp;
use super::util::json_kind;
use crate::errors::ImportError;

/// Decompresses, parses and normalizes one stat file.
///
/// All records share `import_time`. Nothing is returned unless every record
/// of the file transforms cleanly.
///
/// # Errors
/// Returns decompression, parse, or filesystem errors for this file.
pub fn transform_file(path: &Path, import_time: DateTime) -> Result<Vec<Document>, ImportError> {
    let payload = read_gzip_payload(path)?;
    transform_payload(&payload, import_time)
        .map_err(|e| match e {
            ImportError::Json(e) => ImportError::Parse(format!("{}: {e}", path.display())),
            ImportError::Bson(e) => ImportError::Parse(format!("{}: {e}", path.display())),
            ImportError::Parse(msg) => ImportError::Parse(format!("{}: {msg}", path.display())),
            other => other,
        })
}

/// Parses a JSON array payload and normalizes each entry's timestamp.
///
/// # Errors
/// Returns `Json` for malformed JSON, `Bson` for values BSON cannot hold
/// (integers beyond `i64`), and `Parse` for a non-array payload or non-object entries.
pub fn transform_payload(payload: &str, import_time: DateTime) -> Result<Vec<Document>, ImportError> {
    let value: Value = serde_json::from_str(payload)?;
    let Value::Array(entries) = value else {
        return Err(ImportError::Parse(format!(
            "expected a JSON array at the top level, found {}",
            json_kind(&value)
        )));
    };
    let mut records = Vec::with_capacity(entries.len());
    for (i, entry) in entries.iter().enumerate() {
        if !entry.is_object() {
            return Err(ImportError::Parse(format!("entry {i} is a {}, not an object", json_kind(entry))));
        }
        let mut record = bson::to_document(entry)?;
        normalize_timestamp(&mut record, import_time)?;
        records.push(record);
    }
    Ok(records)
}
