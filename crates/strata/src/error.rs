//! Error types for the Strata library.

use std::path::PathBuf;
use thiserror::Error;

use crate::frame::DataType;

/// Main error type for Strata operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Declared schema/feature references are internally inconsistent.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Source file format not handled by the bundled frame engine.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Ingested data disagrees with its declared semantic type.
    #[error("type mismatch in column '{column}': cannot cast {found} to {expected}")]
    TypeMismatch {
        column: String,
        expected: DataType,
        found: String,
    },

    /// An aggregator reference has no registered implementation.
    #[error("unknown aggregator: {0}")]
    UnknownAggregator(String),

    /// Declared aggregator arguments fail validation against the
    /// implementation's argument schema.
    #[error("invalid arguments for aggregate '{aggregate}': {message}")]
    Argument { aggregate: String, message: String },
}

/// Result type alias for Strata operations.
pub type Result<T> = std::result::Result<T, Error>;
