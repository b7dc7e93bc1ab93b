//! Reply capability for a single command event.
//!
//! [`ReplySink`] is transport-specific (e.g. Telegram). [`Interaction`] wraps it and tracks the
//! acknowledgement state so every event gets exactly one user-visible response.

use crate::error::Result;
use async_trait::async_trait;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use tracing::warn;

/// Transport-side reply operations for one event.
#[async_trait]
pub trait ReplySink: Send + Sync {
    /// Acknowledges the event without content (e.g. a "typing" indicator).
    async fn defer(&self) -> Result<()>;
    /// First and only response to an event that was not deferred.
    async fn reply(&self, text: &str) -> Result<()>;
    /// Response sent after a deferral.
    async fn follow_up(&self, text: &str) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AckState {
    Pending,
    Deferred,
    Responded,
}

impl AckState {
    fn from_u8(v: u8) -> Self {
        match v {
            0 => AckState::Pending,
            1 => AckState::Deferred,
            _ => AckState::Responded,
        }
    }

    fn as_u8(self) -> u8 {
        match self {
            AckState::Pending => 0,
            AckState::Deferred => 1,
            AckState::Responded => 2,
        }
    }
}

/// Opaque handle used to answer one command event. Clones share the same state.
#[derive(Clone)]
pub struct Interaction {
    sink: Arc<dyn ReplySink>,
    state: Arc<AtomicU8>,
}

impl Interaction {
    pub fn new(sink: Arc<dyn ReplySink>) -> Self {
        Self {
            sink,
            state: Arc::new(AtomicU8::new(AckState::Pending.as_u8())),
        }
    }

    pub fn state(&self) -> AckState {
        AckState::from_u8(self.state.load(Ordering::SeqCst))
    }

    /// Defers the response. No-op when the event is already acknowledged.
    pub async fn defer(&self) -> Result<()> {
        let swapped = self.state.compare_exchange(
            AckState::Pending.as_u8(),
            AckState::Deferred.as_u8(),
            Ordering::SeqCst,
            Ordering::SeqCst,
        );
        if swapped.is_ok() {
            self.sink.defer().await?;
        }
        Ok(())
    }

    /// Sends the single response: a reply when pending, a follow-up when deferred.
    ///
    /// Returns `Ok(false)` without sending when the event was already answered.
    pub async fn respond(&self, text: &str) -> Result<bool> {
        let previous = AckState::from_u8(
            self.state
                .swap(AckState::Responded.as_u8(), Ordering::SeqCst),
        );
        match previous {
            AckState::Pending => self.sink.reply(text).await?,
            AckState::Deferred => self.sink.follow_up(text).await?,
            AckState::Responded => {
                warn!(
                    text_preview = %text.chars().take(50).collect::<String>(),
                    "Interaction already answered, dropping second response"
                );
                return Ok(false);
            }
        }
        Ok(true)
    }
}
