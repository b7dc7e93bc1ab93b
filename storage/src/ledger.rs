//! Credit ledger abstraction: persistent map from user id to balance.

use crate::error::StorageError;
use crate::models::UserCredits;
use async_trait::async_trait;

/// Data-access layer for balances. No business rules beyond the non-negative invariant.
#[async_trait]
pub trait CreditLedger: Send + Sync {
    /// Returns the stored record, or `None` when the user has never been seen.
    async fn get(&self, user_id: &str) -> Result<Option<UserCredits>, StorageError>;

    /// Inserts or replaces the record. Negative balances are rejected.
    async fn put(&self, record: &UserCredits) -> Result<(), StorageError>;

    /// Atomically subtracts `amount` if the balance covers it.
    ///
    /// Returns the updated record, or `None` when the balance is too low or the user is unknown.
    async fn try_debit(&self, user_id: &str, amount: i64)
        -> Result<Option<UserCredits>, StorageError>;

    /// Atomically adds `amount` to an existing record. `None` when the user is unknown or the
    /// sum would overflow `i64`; the record is left untouched in both cases.
    async fn credit(&self, user_id: &str, amount: i64)
        -> Result<Option<UserCredits>, StorageError>;

    /// Releases the underlying handle. Later calls fail with [`StorageError::Closed`].
    async fn close(&self);
}
