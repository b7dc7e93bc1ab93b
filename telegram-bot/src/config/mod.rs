//! Bot configuration: BaseConfig (Telegram + log + DB + admin) + AppExtensions (credits, APIs, queue).

mod base;
mod bot_config;
mod extensions;

#[cfg(test)]
mod tests;

pub use base::{
    database_url_from_env, BaseConfig, DEFAULT_DATABASE_URL, DEFAULT_LOG_FILE, DEFAULT_SCENES_PATH,
};
pub use bot_config::BotConfig;
pub use extensions::AppExtensions;
