//! Client timestamp normalization.
//!
//! Every record leaves this module with a `timestamp` document holding a
//! server-local `date` string and the shared `importDate` of its file.

use bson::{Bson, DateTime, Document, doc};
use chrono::Local;

use super::util::bson_to_millis;
use crate::errors::ImportError;

/// Rendering applied to `timestamp.date`, e.g. `2023-11-14 22:13:20 +0000`.
pub const CLIENT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// Renders epoch milliseconds as a server-local timestamp in [`CLIENT_DATE_FORMAT`].
///
/// # Errors
/// Returns `ImportError::Parse` when the value is not finite or outside the calendar range.
pub fn render_client_date(millis: f64) -> Result<String, ImportError> {
    if !millis.is_finite() {
        return Err(ImportError::Parse(format!("timestamp {millis} is not a finite number")));
    }
    #[allow(clippy::cast_possible_truncation)]
    let whole = millis.floor() as i64;
    let utc = chrono::DateTime::from_timestamp_millis(whole)
        .ok_or_else(|| ImportError::Parse(format!("timestamp {millis} is out of range")))?;
    Ok(utc.with_timezone(&Local).format(CLIENT_DATE_FORMAT).to_string())
}

/// Rewrites `timestamp.date` and stamps `timestamp.importDate` in place.
///
/// A record without a `timestamp` document, or whose `date` is missing or
/// null, gets `timestamp = { date: 0 }` first.
///
/// # Errors
/// Returns `ImportError::Parse` when the date cannot be rendered.
pub fn normalize_timestamp(record: &mut Document, import_time: DateTime) -> Result<(), ImportError> {
    let has_date = match record.get("timestamp") {
        Some(Bson::Document(ts)) => !matches!(ts.get("date"), None | Some(Bson::Null)),
        _ => false,
    };
    if !has_date {
        record.insert("timestamp", doc! { "date": 0 });
    }
    let ts = record
        .get_document_mut("timestamp")
        .map_err(|e| ImportError::Parse(format!("timestamp: {e}")))?;
    let millis = ts.get("date").map_or(0.0, bson_to_millis);
    ts.insert("date", render_client_date(millis)?);
    ts.insert("importDate", import_time);
    Ok(())
}
