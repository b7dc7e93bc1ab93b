//! Integration tests for the credit ledgers.
//!
//! On-disk SQLite survives close/reopen; the in-memory fake honors the same contract.

use std::sync::Arc;

use storage::{CreditLedger, InMemoryCreditLedger, SqliteCreditLedger, StorageError, UserCredits};
use tempfile::TempDir;

/// **Test: balances written to a file database are visible after reopening it.**
#[tokio::test]
async fn test_sqlite_ledger_persists_across_reopen() {
    let temp_dir = TempDir::new().expect("TempDir::new must succeed");
    let db_path = temp_dir.path().join("credits.db");
    let db_path = db_path.to_str().expect("utf-8 path");

    let ledger = SqliteCreditLedger::new(db_path).await.unwrap();
    ledger.put(&UserCredits::new("alice", 250)).await.unwrap();
    ledger.try_debit("alice", 10).await.unwrap();
    ledger.close().await;

    let reopened = SqliteCreditLedger::new(db_path).await.unwrap();
    let record = reopened.get("alice").await.unwrap().expect("record must survive");
    assert_eq!(record.credits, 240);
    reopened.close().await;
}

/// **Test: concurrent conditional debits on a file database never overdraw.**
///
/// **Setup:** balance 15, four concurrent debits of 10.
/// **Expected:** exactly one succeeds; final balance 5.
#[tokio::test]
async fn test_sqlite_concurrent_debits_never_overdraw() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("credits.db");
    let ledger = Arc::new(
        SqliteCreditLedger::new(db_path.to_str().unwrap())
            .await
            .unwrap(),
    );
    ledger.put(&UserCredits::new("bob", 15)).await.unwrap();

    let mut tasks = Vec::new();
    for _ in 0..4 {
        let ledger = ledger.clone();
        tasks.push(tokio::spawn(async move { ledger.try_debit("bob", 10).await }));
    }
    let mut succeeded = 0;
    for task in tasks {
        if task.await.unwrap().unwrap().is_some() {
            succeeded += 1;
        }
    }

    assert_eq!(succeeded, 1);
    assert_eq!(ledger.get("bob").await.unwrap().unwrap().credits, 5);
}

/// **Test: the in-memory ledger counts writes and refuses access after close.**
#[tokio::test]
async fn test_inmemory_ledger_contract() {
    let ledger = InMemoryCreditLedger::new();

    ledger.put(&UserCredits::new("carol", 3)).await.unwrap();
    assert_eq!(ledger.writes(), 1);
    assert!(ledger.try_debit("carol", 4).await.unwrap().is_none());
    assert_eq!(ledger.try_debit("carol", 3).await.unwrap().unwrap().credits, 0);
    assert!(matches!(
        ledger.put(&UserCredits::new("carol", -5)).await,
        Err(StorageError::InvalidRecord(_))
    ));

    ledger.close().await;
    assert!(ledger.is_closed());
    assert!(matches!(ledger.get("carol").await, Err(StorageError::Closed)));
}

/// **Test: the in-memory ledger refuses an overflowing credit without touching the record.**
#[tokio::test]
async fn test_inmemory_credit_refuses_overflow() {
    let ledger = InMemoryCreditLedger::new();
    ledger.put(&UserCredits::new("u", 250)).await.unwrap();

    assert!(ledger.credit("u", i64::MAX).await.unwrap().is_none());
    assert_eq!(ledger.get("u").await.unwrap().unwrap().credits, 250);
}
