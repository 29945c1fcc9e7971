//! Error types for export-file output.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while serializing and writing output.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Could not create the output directory.
    #[error("failed to create output directory {path}: {source}")]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Could not create the destination file.
    #[error("failed to create output file {path}: {source}")]
    FileCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write to the destination file.
    #[error("failed to write to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A record could not be rendered as JSON.
    #[error("failed to serialize record as JSON: {source}")]
    Serialize {
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for output operations.
pub type Result<T> = std::result::Result<T, OutputError>;
