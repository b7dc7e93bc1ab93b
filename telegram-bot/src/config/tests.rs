//! Config tests.

use crate::config::bot_config::BotConfig;
use crate::config::{DEFAULT_DATABASE_URL, DEFAULT_LOG_FILE, DEFAULT_SCENES_PATH};
use serial_test::serial;
use std::env;

const OPTIONAL_VARS: &[&str] = &[
    "TELEGRAM_API_URL",
    "TELOXIDE_API_URL",
    "DATABASE_URL",
    "LOG_FILE",
    "SCENES_PATH",
    "DEFAULT_START_CREDITS",
    "RENDER_COST",
    "ASK_COST",
    "TOGETHER_BASE_URL",
    "TEXT_MODEL",
    "OPENAI_BASE_URL",
    "IMAGE_MODEL",
    "B2_API_URL",
    "B2_DOWNLOAD_URL",
    "IMAGE_QUEUE_CONCURRENCY",
];

fn set_required_vars() {
    env::set_var("BOT_TOKEN", "test_token");
    env::set_var("ADMIN_USER_ID", "530285329");
    env::set_var("TOGETHER_API_KEY", "tg_key");
    env::set_var("OPENAI_API_KEY", "sk_key");
    env::set_var("B2_APPLICATION_KEY_ID", "kid");
    env::set_var("B2_APPLICATION_KEY", "key");
    env::set_var("B2_BUCKET_ID", "bucket-id");
    env::set_var("B2_BUCKET_NAME", "bucket-name");
}

fn reset_env() {
    for var in OPTIONAL_VARS {
        env::remove_var(var);
    }
    set_required_vars();
}

#[test]
#[serial]
fn test_load_config_with_defaults() {
    reset_env();

    let config = BotConfig::load(None).unwrap();
    config.validate().unwrap();

    assert_eq!(config.bot_token(), "test_token");
    assert_eq!(config.admin_user_id(), "530285329");
    assert!(config.telegram_api_url().is_none());
    assert_eq!(config.database_url(), DEFAULT_DATABASE_URL);
    assert_eq!(config.log_file(), DEFAULT_LOG_FILE);
    assert_eq!(config.scenes_path(), DEFAULT_SCENES_PATH);

    let ext = config.extensions();
    assert_eq!(ext.credits.default_start_credits, 250);
    assert_eq!(ext.credits.render_cost, 10);
    assert_eq!(ext.credits.ask_cost, 3);
    assert_eq!(ext.text.together_base_url, "https://api.together.xyz");
    assert_eq!(ext.image.openai_base_url, "https://api.openai.com/v1");
    assert_eq!(ext.image.image_model, "dall-e-3");
    assert_eq!(ext.archive.api_url, "https://api.backblazeb2.com");
    assert_eq!(ext.archive.download_url, "https://f005.backblazeb2.com");
    assert_eq!(ext.queue.concurrency, 5);
}

#[test]
#[serial]
fn test_load_config_with_custom_values() {
    reset_env();
    env::set_var("DATABASE_URL", "sqlite:/tmp/custom.db");
    env::set_var("TELOXIDE_API_URL", "http://localhost:8081");
    env::set_var("RENDER_COST", "25");
    env::set_var("IMAGE_QUEUE_CONCURRENCY", "2");
    env::set_var("SCENES_PATH", "/etc/bot/scenes.json");

    let config = BotConfig::load(Some("cli_token".to_string())).unwrap();
    config.validate().unwrap();

    assert_eq!(config.bot_token(), "cli_token");
    assert_eq!(config.database_url(), "sqlite:/tmp/custom.db");
    assert_eq!(config.telegram_api_url(), Some("http://localhost:8081"));
    assert_eq!(config.extensions().credits.render_cost, 25);
    assert_eq!(config.extensions().queue.concurrency, 2);
    assert_eq!(config.scenes_path(), "/etc/bot/scenes.json");

    reset_env();
}

#[test]
#[serial]
fn test_load_config_requires_admin_and_keys() {
    reset_env();
    env::remove_var("ADMIN_USER_ID");
    assert!(BotConfig::load(None).is_err());

    reset_env();
    env::remove_var("OPENAI_API_KEY");
    assert!(BotConfig::load(None).is_err());

    reset_env();
    env::remove_var("BOT_TOKEN");
    assert!(BotConfig::load(None).is_err());
    assert!(BotConfig::load(Some("override".to_string())).is_ok());

    reset_env();
}

#[test]
#[serial]
fn test_validate_rejects_invalid_values() {
    reset_env();
    env::set_var("TELEGRAM_API_URL", "not a url");
    let config = BotConfig::load(None).unwrap();
    assert!(config.validate().is_err());

    reset_env();
    env::set_var("OPENAI_BASE_URL", "::bad::");
    let config = BotConfig::load(None).unwrap();
    assert!(config.validate().is_err());

    reset_env();
    env::set_var("ASK_COST", "-1");
    let rejected = BotConfig::load(None).and_then(|config| config.validate());
    assert!(rejected.is_err());

    reset_env();
}
