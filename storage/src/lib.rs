//! Storage crate: the credit ledger and its implementations.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`models`] – UserCredits
//! - [`ledger`] – CreditLedger trait
//! - [`credit_repo`] – SqliteCreditLedger
//! - [`inmemory`] – InMemoryCreditLedger
//! - [`sqlite_pool`] – SqlitePoolManager

mod credit_repo;
mod error;
mod inmemory;
mod ledger;
mod models;
mod sqlite_pool;

#[cfg(test)]
mod credit_repo_test;

pub use credit_repo::SqliteCreditLedger;
pub use error::StorageError;
pub use inmemory::InMemoryCreditLedger;
pub use ledger::CreditLedger;
pub use models::UserCredits;
pub use sqlite_pool::SqlitePoolManager;
