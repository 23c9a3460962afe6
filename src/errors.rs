use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Decompression error: {0}")]
    Decompression(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Serde JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("BSON: {0}")]
    Bson(#[from] bson::ser::Error),

    #[error("Insert error: {0}")]
    Insert(String),

    #[error("Filesystem error: {0}")]
    Filesystem(String),

    #[error("Archive directory error: {0}")]
    ArchiveDir(String),
}

impl ImportError {
    /// Fatal errors abort the whole run; everything else is scoped to one file.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Configuration(_) | Self::Connection(_) | Self::Authentication(_) | Self::ArchiveDir(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_run_level_errors_are_fatal() {
        assert!(ImportError::Configuration("x".into()).is_fatal());
        assert!(ImportError::Connection("x".into()).is_fatal());
        assert!(ImportError::Authentication("x".into()).is_fatal());
        assert!(ImportError::ArchiveDir("x".into()).is_fatal());
        assert!(!ImportError::Decompression("x".into()).is_fatal());
        assert!(!ImportError::Parse("x".into()).is_fatal());
        assert!(!ImportError::Insert("x".into()).is_fatal());
        assert!(!ImportError::Filesystem("x".into()).is_fatal());
        let json = serde_json::from_str::<serde_json::Value>("{bad").unwrap_err();
        assert!(!ImportError::from(json).is_fatal());
    }
}
