use std::fs;
use std::io;
use std::path::Path;

/// Move a file, overwriting any existing destination.
///
/// Uses a rename when possible and falls back to copy-then-remove when the
/// destination lives on another filesystem.
///
/// # Errors
/// Returns an error if neither the rename nor the copy succeeds.
pub fn move_file(from: &Path, to: &Path) -> io::Result<()> {
    if from == to {
        return Ok(());
    }
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            fs::copy(from, to)?;
            fs::remove_file(from)
        }
        Err(e) => Err(e),
    }
}

/// Create a directory and any missing parents.
///
/// # Errors
/// Returns an error if the path exists as a file or cannot be created.
pub fn ensure_dir(path: &Path) -> io::Result<()> {
    fs::create_dir_all(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_overwrites_destination() {
        let dir = tempfile::tempdir().unwrap();
        let from = dir.path().join("a");
        let to = dir.path().join("b");
        fs::write(&from, b"new").unwrap();
        fs::write(&to, b"old").unwrap();
        move_file(&from, &to).unwrap();
        assert!(!from.exists());
        assert_eq!(fs::read(&to).unwrap(), b"new");
    }

    #[test]
    fn ensure_dir_fails_on_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("taken");
        fs::write(&file, b"").unwrap();
        assert!(ensure_dir(&file.join("sub")).is_err());
        assert!(ensure_dir(&dir.path().join("x").join("y")).is_ok());
    }
}
