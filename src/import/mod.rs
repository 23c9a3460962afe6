mod gzip;
mod options;
mod pipeline;
mod timestamp;
mod util;

pub use gzip::read_gzip_payload;
pub use options::{FileFailure, ImportReport};
pub use pipeline::{transform_file, transform_payload};
pub use timestamp::{CLIENT_DATE_FORMAT, normalize_timestamp, render_client_date};
