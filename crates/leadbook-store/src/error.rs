use thiserror::Error;

use leadbook_shared::{BackendError, LeadValidationError};

/// Errors produced by the store layer.
#[derive(Error, Debug)]
pub enum StoreError {
    /// SQLite error.
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Failed to determine a platform data directory.
    #[error("Could not determine application data directory")]
    NoDataDir,

    /// Generic I/O error (e.g. creating the database directory).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A query expected exactly one row but found none.
    #[error("Record not found")]
    NotFound,

    /// Migration failure.
    #[error("Migration error: {0}")]
    Migration(String),

    /// A contact value is already taken by another lead.
    #[error("Contact already in use: {0}")]
    DuplicateContact(String),

    /// Lead intake validation failure.
    #[error("Invalid lead: {0}")]
    Validation(#[from] LeadValidationError),

    /// UUID parsing error.
    #[error("UUID error: {0}")]
    Uuid(#[from] uuid::Error),

    /// Timestamp parse error.
    #[error("Timestamp parse error: {0}")]
    ChronoParse(#[from] chrono::ParseError),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Collapse a store failure into the two-variant backend taxonomy the
/// report layer understands.  Row decoding problems are unexpected;
/// connectivity and SQL failures mean the store is unavailable.
impl From<StoreError> for BackendError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Sqlite(rusqlite::Error::FromSqlConversionFailure(..)) => {
                BackendError::Unexpected(err.to_string())
            }
            StoreError::Sqlite(_) | StoreError::Io(_) | StoreError::NoDataDir => {
                BackendError::Unavailable(err.to_string())
            }
            StoreError::Migration(_) => BackendError::Unavailable(err.to_string()),
            other => BackendError::Unexpected(other.to_string()),
        }
    }
}
