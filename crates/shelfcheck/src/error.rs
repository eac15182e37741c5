//! Error types for the shelfcheck library.
//!
//! Problems with the *data* never surface here; they become
//! [`ValidationIssue`](crate::validation::ValidationIssue)s. These errors cover
//! I/O, malformed configuration, and misuse of the curation API.

use std::path::PathBuf;
use thiserror::Error;

use crate::schema::DatasetType;
use crate::suggestion::CorrectionTier;

/// Main error type for shelfcheck operations.
#[derive(Debug, Error)]
pub enum ShelfcheckError {
    /// Error reading or writing a file.
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

    /// Empty file or no data to read.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// A dataset type override that names no known type.
    #[error("Unknown dataset type '{0}' (expected sales, offers, or demographics)")]
    UnknownDatasetType(String),

    /// No schema is defined for the requested dataset type.
    #[error("No schema defined for dataset type '{0}'")]
    NoSchema(DatasetType),

    /// A correction id that does not exist in the result.
    #[error("Correction '{0}' not found")]
    CorrectionNotFound(String),

    /// A correction that cannot be applied (critical tier).
    #[error("Correction '{id}' is {tier} and cannot be applied")]
    NotApplicable { id: String, tier: CorrectionTier },

    /// A manual correction accepted without a replacement value.
    #[error("Correction '{0}' needs a value; use modify to supply one")]
    ValueRequired(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for shelfcheck operations.
pub type Result<T> = std::result::Result<T, ShelfcheckError>;
