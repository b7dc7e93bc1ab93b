//! # Telegram bot application
//!
//! Wires storage, credit-manager, the generation and archive clients, image-handlers and
//! command-router. Loads config from env and runs the REPL.

pub mod cli;
pub mod components;
pub mod config;
pub mod runner;
pub mod telegram;

pub use cli::{load_config, Cli, Commands};
pub use components::{build_bot_components, build_teloxide_bot, BotComponents};
pub use config::{database_url_from_env, AppExtensions, BaseConfig, BotConfig};
pub use runner::{fetch_stored_balance, run_bot};
pub use telegram::{parse_command, register_commands, run_repl, TelegramReplySink};
