//! [`ReplySink`] backed by a Telegram chat.

use async_trait::async_trait;
use dbot_core::{DbotError, ReplySink, Result};
use teloxide::prelude::*;
use teloxide::types::{ChatAction, ChatId};

/// Sends replies to the chat the command came from. Deferral shows the "typing" action.
pub struct TelegramReplySink {
    bot: teloxide::Bot,
    chat_id: ChatId,
}

impl TelegramReplySink {
    pub fn new(bot: teloxide::Bot, chat_id: ChatId) -> Self {
        Self { bot, chat_id }
    }

    async fn send(&self, text: &str) -> Result<()> {
        self.bot
            .send_message(self.chat_id, text.to_string())
            .await
            .map_err(|e| DbotError::Bot(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl ReplySink for TelegramReplySink {
    async fn defer(&self) -> Result<()> {
        self.bot
            .send_chat_action(self.chat_id, ChatAction::Typing)
            .await
            .map_err(|e| DbotError::Bot(e.to_string()))?;
        Ok(())
    }

    async fn reply(&self, text: &str) -> Result<()> {
        self.send(text).await
    }

    async fn follow_up(&self, text: &str) -> Result<()> {
        self.send(text).await
    }
}
