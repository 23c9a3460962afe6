#![cfg(test)]

// Tiny test-only helpers for stat files
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::write::GzEncoder;

/// Gzip `payload` into `dir/name` and return the path.
pub fn write_gz(dir: &Path, name: &str, payload: &[u8]) -> PathBuf {
    let path = dir.join(name);
    let file = File::create(&path).expect("create stat file");
    let mut encoder = GzEncoder::new(file, Compression::default());
    encoder.write_all(payload).expect("write stat payload");
    encoder.finish().expect("finish gzip stream");
    path
}
