use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use flate2::read::GzDecoder;

use crate::errors::ImportError;

/// Decompresses a gzip file into its UTF-8 text payload.
///
/// # Errors
/// `Filesystem` if the file cannot be opened, `Decompression` if it is not a
/// complete gzip stream, `Parse` if the payload is not UTF-8.
pub fn read_gzip_payload(path: &Path) -> Result<String, ImportError> {
    let file = File::open(path)
        .map_err(|e| ImportError::Filesystem(format!("cannot open {}: {e}", path.display())))?;
    let compressed_len = file
        .metadata()
        .map_err(|e| ImportError::Filesystem(format!("cannot stat {}: {e}", path.display())))?
        .len();
    if compressed_len == 0 {
        return Err(ImportError::Decompression(format!("{}: empty file", path.display())));
    }
    log::debug!("decompressing {} ({compressed_len} bytes)", path.display());

    let mut decoder = GzDecoder::new(BufReader::new(file));
    let mut bytes = Vec::new();
    decoder
        .read_to_end(&mut bytes)
        .map_err(|e| ImportError::Decompression(format!("{}: {e}", path.display())))?;
    String::from_utf8(bytes)
        .map_err(|e| ImportError::Parse(format!("{}: payload is not UTF-8: {e}", path.display())))
}
