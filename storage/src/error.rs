//! Storage error types.
//!
//! Returned by [`crate::CreditLedger`] implementations; callers above the ledger map them to
//! `DbotError::StoreUnavailable`.

use thiserror::Error;

/// Errors that can occur when reading or writing the credit ledger.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
    #[error("Ledger is closed")]
    Closed,
}

impl From<sqlx::Error> for StorageError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::PoolClosed => StorageError::Closed,
            other => StorageError::Database(other.to_string()),
        }
    }
}
