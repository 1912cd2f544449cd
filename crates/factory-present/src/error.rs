//! Error types for the presentation layer.

use factory_core::ErrorCategory;
use thiserror::Error;

/// Errors that can occur while exporting a table.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Format is not csv, json or html.
    #[error("Invalid output format: {0}")]
    UnsupportedFormat(String),

    /// Target path is empty, has a missing directory or a bad filename.
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ExportError {
    /// Category of this error.
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::Serialization
    }
}
