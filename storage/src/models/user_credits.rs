//! Per-user credit balance.
//!
//! Maps to the `user_credits` table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserCredits {
    pub user_id: String,
    /// Never negative; the ledger rejects negative writes.
    pub credits: i64,
    pub last_updated: DateTime<Utc>,
}

impl UserCredits {
    /// Creates a record stamped with the current time.
    pub fn new(user_id: impl Into<String>, credits: i64) -> Self {
        Self {
            user_id: user_id.into(),
            credits,
            last_updated: Utc::now(),
        }
    }
}
