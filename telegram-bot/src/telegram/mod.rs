//! Telegram transport: command parsing, reply sink, REPL runner.

mod parse;
mod reply_sink;
mod runner;

pub use parse::parse_command;
pub use reply_sink::TelegramReplySink;
pub use runner::{register_commands, run_repl};
