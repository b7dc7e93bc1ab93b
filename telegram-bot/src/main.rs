//! credit-bot binary: run the bot, or inspect a balance.

use anyhow::Result;
use clap::Parser;
use telegram_bot::{database_url_from_env, fetch_stored_balance, load_config, run_bot, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => {
            let config = load_config(token)?;
            run_bot(config).await
        }
        Commands::Balance { user_id } => {
            match fetch_stored_balance(&database_url_from_env(), &user_id).await? {
                Some(credits) => println!("{}: {} credits", user_id, credits),
                None => println!("{}: no record", user_id),
            }
            Ok(())
        }
    }
}
