//! Error types for QRDA document ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while locating or decoding documents.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Directory not found or not readable.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Input file not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === XML Errors ===
    /// The XML is malformed.
    #[error("failed to parse XML {input}: {message}")]
    XmlParse { input: String, message: String },

    /// The input holds no element with the configured row tag.
    #[error("no <{row_tag}> element found in {input}")]
    NoDocuments { input: String, row_tag: String },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
