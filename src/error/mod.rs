//! Error handling for lead processing.

use std::io;
use std::path::PathBuf;

use arrow::error::ArrowError;
use parquet::errors::ParquetError;

pub mod util;

/// Specialized error type for classifying and grouping uploads
#[derive(Debug, thiserror::Error)]
pub enum LeadsError {
    /// The dataset lacks the required address column
    #[error("Missing required column '{column}'")]
    MissingField {
        /// Name of the column that was expected
        column: String,
    },

    /// The uploaded file could not be parsed as a spreadsheet
    #[error("Malformed file {}: {reason}", .path.display())]
    MalformedFile {
        /// Path of the offending upload
        path: PathBuf,
        /// Underlying cause text
        reason: String,
    },

    /// Error opening, reading or writing a file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error building or transforming Arrow data
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// Error decoding Parquet data
    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl LeadsError {
    /// Creates a `MissingField` error for the given column
    pub fn missing_field(column: impl Into<String>) -> Self {
        Self::MissingField {
            column: column.into(),
        }
    }

    /// Creates a `MalformedFile` error from any displayable cause
    pub fn malformed(path: impl Into<PathBuf>, reason: impl std::fmt::Display) -> Self {
        Self::MalformedFile {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// The message shown to the person who uploaded the file.
    ///
    /// A missing address column gets a dedicated explanation; everything else
    /// is reported with its cause text.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingField { column } => {
                format!("The uploaded file does not contain a '{column}' column.")
            }
            Self::MalformedFile { reason, .. } => format!("Error processing file: {reason}"),
            other => format!("Error processing file: {other}"),
        }
    }
}

/// Result type for lead processing operations
pub type Result<T> = std::result::Result<T, LeadsError>;
