//! Error types for cinedb-ingest

use std::path::PathBuf;
use thiserror::Error;

/// Result type for ingest operations
pub type IngestResult<T> = std::result::Result<T, IngestError>;

/// Ingest error type
///
/// Every variant aborts the run. Rows that fail cleaning are not errors;
/// they only show up in the report counts.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Source export missing, unreadable or malformed
    #[error("Cannot read source {}: {source}", .path.display())]
    Source {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Source export lacks a column the catalog needs
    #[error("Source {} is missing required column '{column}'", .path.display())]
    MissingColumn { path: PathBuf, column: &'static str },

    /// Store or configuration error
    #[error(transparent)]
    Common(#[from] cinedb_common::Error),
}
