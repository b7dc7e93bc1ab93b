//! Base config: Telegram connection, logging, credit database, admin identity, scene catalog.

use anyhow::{Context, Result};
use std::env;

pub const DEFAULT_DATABASE_URL: &str = "./credits.db";
pub const DEFAULT_LOG_FILE: &str = "logs/task.log";
pub const DEFAULT_SCENES_PATH: &str = "scenes.json";

/// `DATABASE_URL`, falling back to [`DEFAULT_DATABASE_URL`].
pub fn database_url_from_env() -> String {
    env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

#[derive(Debug, Clone)]
pub struct BaseConfig {
    /// BOT_TOKEN
    pub bot_token: String,
    /// TELEGRAM_API_URL or TELOXIDE_API_URL
    pub telegram_api_url: Option<String>,
    pub log_file: String,
    /// Credit ledger location (SQLite file path or `sqlite:` URL)
    pub database_url: String,
    /// ADMIN_USER_ID: the only identity allowed to run `addcredits`
    pub admin_user_id: String,
    pub scenes_path: String,
}

impl BaseConfig {
    /// Load from environment variables. `token` overrides BOT_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(token) => token,
            None => env::var("BOT_TOKEN").context("BOT_TOKEN not set")?,
        };
        let admin_user_id = env::var("ADMIN_USER_ID").context("ADMIN_USER_ID not set")?;
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
        let scenes_path =
            env::var("SCENES_PATH").unwrap_or_else(|_| DEFAULT_SCENES_PATH.to_string());

        Ok(Self {
            bot_token,
            telegram_api_url,
            log_file,
            database_url: database_url_from_env(),
            admin_user_id: admin_user_id.trim().to_string(),
            scenes_path,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.bot_token.trim().is_empty() {
            anyhow::bail!("BOT_TOKEN is empty");
        }
        if self.admin_user_id.is_empty() {
            anyhow::bail!("ADMIN_USER_ID is empty");
        }
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                );
            }
        }
        Ok(())
    }
}
