//! REPL runner: parses command messages into [`dbot_core::CommandEvent`]s and hands them to the
//! [`CommandRouter`], one spawned task per event.

use anyhow::Result;
use command_router::{CommandRouter, COMMANDS};
use dbot_core::Interaction;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::BotCommand;
use tracing::{info, instrument, warn};

use super::parse::parse_command;
use super::reply_sink::TelegramReplySink;

/// Registers the command list shown in Telegram clients.
pub async fn register_commands(bot: &teloxide::Bot) {
    let commands: Vec<BotCommand> = COMMANDS
        .iter()
        .map(|spec| BotCommand::new(spec.name, spec.description))
        .collect();
    match bot.set_my_commands(commands).await {
        Ok(_) => info!(count = COMMANDS.len(), "Registered bot commands"),
        Err(e) => warn!(error = %e, "Error registering bot commands"),
    }
}

/// Starts the REPL. Returns when the dispatcher stops (Ctrl-C).
#[instrument(skip(bot, router))]
pub async fn run_repl(bot: teloxide::Bot, router: Arc<CommandRouter>) -> Result<()> {
    let bot_username = match bot.get_me().await {
        Ok(me) => {
            let username = me.user.username.clone();
            if let Some(ref username) = username {
                info!(username = %username, "Bot username set before repl");
            }
            username
        }
        Err(e) => {
            warn!(error = %e, "get_me failed; accepting commands addressed to any bot");
            None
        }
    };
    let bot_username = Arc::new(bot_username);

    register_commands(&bot).await;

    teloxide::repl(bot, move |bot: Bot, msg: Message| {
        let router = router.clone();
        let bot_username = bot_username.clone();

        async move {
            let Some(text) = msg.text() else {
                return respond(());
            };
            let Some(from) = msg.from.as_ref() else {
                return respond(());
            };
            let user_id = from.id.0.to_string();
            let Some(event) = parse_command(
                text,
                &user_id,
                from.username.as_deref(),
                bot_username.as_deref(),
            ) else {
                return respond(());
            };

            info!(
                user_id = %event.user_id,
                chat_id = msg.chat.id.0,
                command = %event.command_name,
                "Received command"
            );

            let interaction = Interaction::new(Arc::new(TelegramReplySink::new(bot, msg.chat.id)));
            tokio::spawn(async move {
                router.dispatch(&event, interaction).await;
            });

            respond(())
        }
    })
    .await;

    Ok(())
}
