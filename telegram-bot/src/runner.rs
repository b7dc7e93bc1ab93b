use anyhow::{Context, Result};
use dbot_core::init_tracing;
use std::sync::Arc;
use storage::{CreditLedger, SqliteCreditLedger};
use tracing::{info, instrument};

use crate::components::build_bot_components;
use crate::config::BotConfig;
use crate::telegram::run_repl;

async fn open_ledger(database_url: &str) -> Result<Arc<SqliteCreditLedger>> {
    let ledger = SqliteCreditLedger::new(database_url)
        .await
        .with_context(|| format!("Failed to open credit ledger at {}", database_url))?;
    Ok(Arc::new(ledger))
}

/// Main entry: init logging, validate config, open the ledger, build components, run the REPL.
/// The ledger is closed before returning, also after Ctrl-C.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    init_tracing(config.log_file())?;

    info!(
        database_url = %config.database_url(),
        concurrency = config.extensions().queue.concurrency,
        "Initializing bot"
    );

    let ledger = open_ledger(config.database_url()).await?;
    let components = match build_bot_components(&config, ledger.clone()) {
        Ok(components) => components,
        Err(e) => {
            ledger.close().await;
            return Err(e);
        }
    };

    info!("Bot started successfully");

    let result = tokio::select! {
        result = run_repl(components.teloxide_bot.clone(), components.router.clone()) => result,
        _ = tokio::signal::ctrl_c() => {
            info!("Ctrl-C received, shutting down");
            Ok(())
        }
    };

    components.queue.shutdown();
    components.credits.close().await;
    info!("Credit ledger closed");

    result
}

/// Reads a balance straight from the ledger without initializing missing users.
pub async fn fetch_stored_balance(database_url: &str, user_id: &str) -> Result<Option<i64>> {
    let ledger = open_ledger(database_url).await?;
    let record = ledger.get(user_id).await;
    ledger.close().await;
    Ok(record
        .with_context(|| format!("Failed to read balance for {}", user_id))?
        .map(|record| record.credits))
}
