//! Storage Layer
//!
//! SQLite persistence for temperature readings, accessed through a
//! cloneable repository handle.

mod repository;

pub use repository::{NewReading, RankedReading, Repository};

use sqlx::error::ErrorKind;
use thiserror::Error;

/// Storage errors
///
/// Both variants carry the engine's message verbatim.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A column constraint (CHECK / NOT NULL) rejected the row
    #[error("{0}")]
    Constraint(String),
    /// Any other engine, pool or I/O failure
    #[error("{0}")]
    Database(String),
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) => match db_err.kind() {
                ErrorKind::CheckViolation | ErrorKind::NotNullViolation => {
                    StorageError::Constraint(db_err.message().to_string())
                }
                _ => StorageError::Database(db_err.message().to_string()),
            },
            _ => StorageError::Database(err.to_string()),
        }
    }
}
