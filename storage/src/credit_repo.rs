//! SQLite-backed credit ledger.
//!
//! Debits and credits are single conditional `UPDATE ... RETURNING` statements, so concurrent
//! writers (even from other processes) cannot drive a balance below zero.

use crate::error::StorageError;
use crate::ledger::CreditLedger;
use crate::models::UserCredits;
use crate::sqlite_pool::SqlitePoolManager;
use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info, instrument};

#[derive(Clone)]
pub struct SqliteCreditLedger {
    pool_manager: SqlitePoolManager,
}

impl SqliteCreditLedger {
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool_manager = SqlitePoolManager::new(database_url).await?;
        let ledger = Self { pool_manager };
        ledger.init().await?;
        Ok(ledger)
    }

    async fn init(&self) -> Result<(), StorageError> {
        info!("Creating user_credits table if not exist");

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS user_credits (
                user_id TEXT PRIMARY KEY,
                credits INTEGER NOT NULL CHECK (credits >= 0),
                last_updated TEXT NOT NULL
            )
            "#,
        )
        .execute(self.pool_manager.pool())
        .await?;

        Ok(())
    }
}

#[async_trait]
impl CreditLedger for SqliteCreditLedger {
    async fn get(&self, user_id: &str) -> Result<Option<UserCredits>, StorageError> {
        let record = sqlx::query_as::<_, UserCredits>(
            "SELECT user_id, credits, last_updated FROM user_credits WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_optional(self.pool_manager.pool())
        .await?;

        Ok(record)
    }

    #[instrument(skip(self, record), fields(user_id = %record.user_id))]
    async fn put(&self, record: &UserCredits) -> Result<(), StorageError> {
        if record.credits < 0 {
            return Err(StorageError::InvalidRecord(format!(
                "negative balance {} for user {}",
                record.credits, record.user_id
            )));
        }

        sqlx::query(
            r#"
            INSERT INTO user_credits (user_id, credits, last_updated)
            VALUES (?, ?, ?)
            ON CONFLICT(user_id) DO UPDATE SET
                credits = excluded.credits,
                last_updated = excluded.last_updated
            "#,
        )
        .bind(&record.user_id)
        .bind(record.credits)
        .bind(record.last_updated)
        .execute(self.pool_manager.pool())
        .await?;

        debug!(credits = record.credits, "Saved user credits");
        Ok(())
    }

    async fn try_debit(
        &self,
        user_id: &str,
        amount: i64,
    ) -> Result<Option<UserCredits>, StorageError> {
        let record = sqlx::query_as::<_, UserCredits>(
            r#"
            UPDATE user_credits
            SET credits = credits - ?, last_updated = ?
            WHERE user_id = ? AND credits >= ?
            RETURNING user_id, credits, last_updated
            "#,
        )
        .bind(amount)
        .bind(Utc::now())
        .bind(user_id)
        .bind(amount)
        .fetch_optional(self.pool_manager.pool())
        .await?;

        Ok(record)
    }

    async fn credit(
        &self,
        user_id: &str,
        amount: i64,
    ) -> Result<Option<UserCredits>, StorageError> {
        let record = sqlx::query_as::<_, UserCredits>(
            r#"
            UPDATE user_credits
            SET credits = credits + ?, last_updated = ?
            WHERE user_id = ? AND credits <= 9223372036854775807 - ?
            RETURNING user_id, credits, last_updated
            "#,
        )
        .bind(amount)
        .bind(Utc::now())
        .bind(user_id)
        .bind(amount)
        .fetch_optional(self.pool_manager.pool())
        .await?;

        Ok(record)
    }

    async fn close(&self) {
        self.pool_manager.close().await;
    }
}
