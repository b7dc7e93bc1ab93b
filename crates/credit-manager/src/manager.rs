//! Credit manager: business rules on top of a [`CreditLedger`].

use dbot_core::{DbotError, Result};
use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};
use storage::{CreditLedger, StorageError, UserCredits};
use tokio::sync::Mutex;
use tracing::{error, info, instrument, warn};

use crate::config::CreditConfig;

fn store_unavailable(user_id: &str, e: StorageError) -> DbotError {
    error!(user_id = %user_id, error = %e, "Credit ledger access failed");
    DbotError::StoreUnavailable(e.to_string())
}

/// Initializes, deducts and tops up balances.
///
/// Read-modify-write sequences for one user are serialized by a per-user async lock; the
/// ledger's conditional debit additionally guards against writers in other processes.
pub struct CreditManager {
    ledger: Arc<dyn CreditLedger>,
    config: CreditConfig,
    user_locks: StdMutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl CreditManager {
    pub fn new(ledger: Arc<dyn CreditLedger>, config: CreditConfig) -> Self {
        info!(
            default_start_credits = config.default_start_credits,
            render_cost = config.render_cost,
            ask_cost = config.ask_cost,
            "CreditManager created"
        );
        Self {
            ledger,
            config,
            user_locks: StdMutex::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &CreditConfig {
        &self.config
    }

    fn user_lock(&self, user_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self
            .user_locks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        locks
            .entry(user_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Returns the user's balance, initializing it to the default when absent or zero.
    #[instrument(skip(self))]
    pub async fn fetch_balance(&self, user_id: &str) -> Result<UserCredits> {
        let lock = self.user_lock(user_id);
        let _guard = lock.lock().await;
        self.fetch_balance_locked(user_id).await
    }

    async fn fetch_balance_locked(&self, user_id: &str) -> Result<UserCredits> {
        let existing = self
            .ledger
            .get(user_id)
            .await
            .map_err(|e| store_unavailable(user_id, e))?;

        match existing {
            Some(record) if record.credits != 0 => Ok(record),
            // A zero balance is treated like a missing record and reset to the default.
            _ => {
                let record = UserCredits::new(user_id, self.config.default_start_credits);
                self.ledger
                    .put(&record)
                    .await
                    .map_err(|e| store_unavailable(user_id, e))?;
                info!(
                    user_id = %user_id,
                    credits = record.credits,
                    "Initialized user credits"
                );
                Ok(record)
            }
        }
    }

    /// Deducts `amount` when the balance covers it.
    ///
    /// Returns `Ok(false)` and leaves the balance unchanged on insufficient funds.
    #[instrument(skip(self))]
    pub async fn deduct(&self, user_id: &str, amount: i64) -> Result<bool> {
        if amount < 0 {
            warn!(user_id = %user_id, amount, "Refusing negative deduction");
            return Err(DbotError::InvalidAmount(amount));
        }

        let lock = self.user_lock(user_id);
        let _guard = lock.lock().await;

        let current = self.fetch_balance_locked(user_id).await?;
        if current.credits < amount {
            warn!(
                user_id = %user_id,
                credits = current.credits,
                amount,
                "Failed to deduct credits: insufficient balance"
            );
            return Ok(false);
        }

        let updated = self
            .ledger
            .try_debit(user_id, amount)
            .await
            .map_err(|e| store_unavailable(user_id, e))?;

        match updated {
            Some(record) => {
                info!(
                    user_id = %user_id,
                    amount,
                    credits = record.credits,
                    "Deducted credits"
                );
                Ok(true)
            }
            None => {
                warn!(
                    user_id = %user_id,
                    amount,
                    "Conditional debit refused; balance changed concurrently"
                );
                Ok(false)
            }
        }
    }

    pub async fn deduct_render(&self, user_id: &str) -> Result<bool> {
        self.deduct(user_id, self.config.render_cost).await
    }

    pub async fn deduct_ask(&self, user_id: &str) -> Result<bool> {
        self.deduct(user_id, self.config.ask_cost).await
    }

    /// Adds a positive `amount` and returns the new balance.
    #[instrument(skip(self))]
    pub async fn add(&self, user_id: &str, amount: i64) -> Result<UserCredits> {
        if amount <= 0 {
            warn!(user_id = %user_id, amount, "Invalid credit amount");
            return Err(DbotError::InvalidAmount(amount));
        }

        let lock = self.user_lock(user_id);
        let _guard = lock.lock().await;

        let current = self.fetch_balance_locked(user_id).await?;
        if current.credits.checked_add(amount).is_none() {
            warn!(user_id = %user_id, amount, credits = current.credits, "Credit sum overflows");
            return Err(DbotError::InvalidAmount(amount));
        }
        let updated = self
            .ledger
            .credit(user_id, amount)
            .await
            .map_err(|e| store_unavailable(user_id, e))?
            .ok_or_else(|| {
                DbotError::StoreUnavailable(format!("record for {} vanished", user_id))
            })?;

        info!(
            user_id = %user_id,
            amount,
            credits = updated.credits,
            "Added credits"
        );
        Ok(updated)
    }

    /// Releases the ledger. Call once at shutdown.
    pub async fn close(&self) {
        self.ledger.close().await;
        info!("CreditManager closed");
    }
}
