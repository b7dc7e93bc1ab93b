//! Unit tests for SqliteCreditLedger.
//!
//! Covers get/put upsert, conditional debit, credit, and close.

use crate::credit_repo::SqliteCreditLedger;
use crate::error::StorageError;
use crate::ledger::CreditLedger;
use crate::models::UserCredits;

async fn memory_ledger() -> SqliteCreditLedger {
    SqliteCreditLedger::new("sqlite::memory:")
        .await
        .expect("Failed to create ledger")
}

#[tokio::test]
async fn test_get_unknown_user_returns_none() {
    let ledger = memory_ledger().await;

    let record = ledger.get("nobody").await.expect("Failed to query");

    assert!(record.is_none());
}

#[tokio::test]
async fn test_put_then_get_and_overwrite() {
    let ledger = memory_ledger().await;

    ledger
        .put(&UserCredits::new("u1", 250))
        .await
        .expect("Failed to save credits");
    ledger
        .put(&UserCredits::new("u1", 120))
        .await
        .expect("Failed to overwrite credits");

    let record = ledger.get("u1").await.unwrap().expect("record must exist");
    assert_eq!(record.user_id, "u1");
    assert_eq!(record.credits, 120);
}

#[tokio::test]
async fn test_put_negative_is_rejected() {
    let ledger = memory_ledger().await;

    let result = ledger.put(&UserCredits::new("u1", -1)).await;

    assert!(matches!(result, Err(StorageError::InvalidRecord(_))));
    assert!(ledger.get("u1").await.unwrap().is_none());
}

#[tokio::test]
async fn test_try_debit_succeeds_when_covered() {
    let ledger = memory_ledger().await;
    ledger.put(&UserCredits::new("u1", 10)).await.unwrap();

    let updated = ledger.try_debit("u1", 10).await.unwrap();

    assert_eq!(updated.map(|r| r.credits), Some(0));
}

#[tokio::test]
async fn test_try_debit_refuses_overdraft() {
    let ledger = memory_ledger().await;
    ledger.put(&UserCredits::new("u1", 5)).await.unwrap();

    let updated = ledger.try_debit("u1", 6).await.unwrap();

    assert!(updated.is_none());
    assert_eq!(ledger.get("u1").await.unwrap().unwrap().credits, 5);
}

#[tokio::test]
async fn test_try_debit_unknown_user() {
    let ledger = memory_ledger().await;

    assert!(ledger.try_debit("ghost", 1).await.unwrap().is_none());
}

#[tokio::test]
async fn test_credit_adds_to_existing() {
    let ledger = memory_ledger().await;
    ledger.put(&UserCredits::new("u1", 7)).await.unwrap();

    let updated = ledger.credit("u1", 3).await.unwrap();

    assert_eq!(updated.map(|r| r.credits), Some(10));
    assert!(ledger.credit("ghost", 3).await.unwrap().is_none());
}

#[tokio::test]
async fn test_credit_refuses_overflow_and_keeps_row() {
    let ledger = memory_ledger().await;
    ledger.put(&UserCredits::new("u", 250)).await.unwrap();

    assert!(ledger.credit("u", i64::MAX).await.unwrap().is_none());

    let record = ledger.get("u").await.unwrap().unwrap();
    assert_eq!(record.credits, 250);
    let topped = ledger.credit("u", i64::MAX - 250).await.unwrap();
    assert_eq!(topped.map(|r| r.credits), Some(i64::MAX));
}

#[tokio::test]
async fn test_queries_fail_after_close() {
    let ledger = memory_ledger().await;
    ledger.close().await;

    let result = ledger.get("u1").await;

    assert!(matches!(result, Err(StorageError::Closed)));
}
