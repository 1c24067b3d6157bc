//! Error types for docdiff library.

use std::io;
use thiserror::Error;

/// Result type alias for docdiff operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading or comparing documents.
///
/// A document kind mismatch is deliberately absent: two documents of
/// different kinds still compare, yielding a single structural record.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON (de)serialization error outside of document loading.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The input is not a well-formed normalized document (missing or
    /// unrecognized `type`, wrong field shapes).
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// No extractor is registered for the given file extension.
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// An embedded image payload could not be decoded.
    #[error("Image decoding error: {0}")]
    ImageDecode(String),

    /// Error during report rendering (JSON, text).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}
