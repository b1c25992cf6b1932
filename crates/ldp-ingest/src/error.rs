//! Error types for bronze-layer ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or writing pipeline data.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Source file not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Source file has the wrong extension for the requested loader.
    #[error("expected a .{expected} file, got: {path}")]
    UnsupportedExtension {
        path: PathBuf,
        expected: &'static str,
    },

    /// Failed to read or write a file.
    #[error("failed to access {path}: {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse CSV content.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// Failed to parse JSON content.
    #[error("failed to parse JSON {path}: {source}")]
    JsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// JSON document does not have a tabular shape.
    #[error("unexpected JSON shape in {path}: {reason}")]
    JsonShape { path: PathBuf, reason: String },

    /// Failed DataFrame construction or write.
    #[error("dataframe operation failed for {path}: {message}")]
    Frame { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, IngestError>;
