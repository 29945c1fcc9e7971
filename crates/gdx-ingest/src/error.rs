//! Error types for export-file ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading and parsing an export file.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Source file not found.
    #[error("export file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read from the source file.
    #[error("failed to read export file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The byte stream is not valid UTF-16LE.
    #[error("malformed UTF-16 data in {path} near byte {offset}")]
    Decode { path: PathBuf, offset: u64 },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/data/in/players.txt"),
        };
        assert_eq!(
            err.to_string(),
            "export file not found: /data/in/players.txt"
        );
    }
}
