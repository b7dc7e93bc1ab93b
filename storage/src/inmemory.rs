//! In-memory credit ledger for tests and local runs without a database.

use crate::error::StorageError;
use crate::ledger::CreditLedger;
use crate::models::UserCredits;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::Mutex;

#[derive(Default)]
pub struct InMemoryCreditLedger {
    records: Mutex<HashMap<String, UserCredits>>,
    writes: AtomicUsize,
    closed: AtomicBool,
}

impl InMemoryCreditLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `put` calls; lets tests assert how often a record was persisted.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn ensure_open(&self) -> Result<(), StorageError> {
        if self.is_closed() {
            return Err(StorageError::Closed);
        }
        Ok(())
    }
}

#[async_trait]
impl CreditLedger for InMemoryCreditLedger {
    async fn get(&self, user_id: &str) -> Result<Option<UserCredits>, StorageError> {
        self.ensure_open()?;
        Ok(self.records.lock().await.get(user_id).cloned())
    }

    async fn put(&self, record: &UserCredits) -> Result<(), StorageError> {
        self.ensure_open()?;
        if record.credits < 0 {
            return Err(StorageError::InvalidRecord(format!(
                "negative balance {} for user {}",
                record.credits, record.user_id
            )));
        }
        self.records
            .lock()
            .await
            .insert(record.user_id.clone(), record.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn try_debit(
        &self,
        user_id: &str,
        amount: i64,
    ) -> Result<Option<UserCredits>, StorageError> {
        self.ensure_open()?;
        let mut records = self.records.lock().await;
        match records.get_mut(user_id) {
            Some(record) if record.credits >= amount => {
                record.credits -= amount;
                record.last_updated = Utc::now();
                Ok(Some(record.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn credit(
        &self,
        user_id: &str,
        amount: i64,
    ) -> Result<Option<UserCredits>, StorageError> {
        self.ensure_open()?;
        let mut records = self.records.lock().await;
        Ok(records.get_mut(user_id).and_then(|record| {
            record.credits = record.credits.checked_add(amount)?;
            record.last_updated = Utc::now();
            Some(record.clone())
        }))
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}
