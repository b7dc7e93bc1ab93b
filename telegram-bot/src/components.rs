//! Component factory: builds BotComponents from config. Isolates assembly logic from runner.

use anyhow::{Context, Result};
use archive_client::B2ArchiveClient;
use command_router::CommandRouter;
use credit_manager::CreditManager;
use image_generation_client::ImageGenerationClient;
use image_handlers::{ImageJobQueue, ImagePipeline, SceneCatalog};
use llm_client::TogetherClient;
use std::sync::Arc;
use storage::CreditLedger;
use teloxide::prelude::*;
use tracing::{error, info, instrument};

use super::config::BotConfig;

/// Everything the runner needs; produced by the component factory.
pub struct BotComponents {
    pub teloxide_bot: Bot,
    pub credits: Arc<CreditManager>,
    pub queue: Arc<ImageJobQueue>,
    pub router: Arc<CommandRouter>,
}

/// Builds the teloxide Bot, honoring a custom API URL.
pub fn build_teloxide_bot(config: &BotConfig) -> Bot {
    let bot = Bot::new(config.bot_token().to_string());
    if let Some(url_str) = config.telegram_api_url() {
        match reqwest::Url::parse(url_str) {
            Ok(url) => bot.set_api_url(url),
            Err(e) => {
                error!(error = %e, url = %url_str, "Invalid TELEGRAM_API_URL, using default");
                bot
            }
        }
    } else {
        bot
    }
}

/// Builds all components over an opened ledger. Must run inside a tokio runtime (spawns the
/// image workers).
#[instrument(skip(config, ledger))]
pub fn build_bot_components(
    config: &BotConfig,
    ledger: Arc<dyn CreditLedger>,
) -> Result<BotComponents> {
    let ext = config.extensions();

    let scenes = Arc::new(SceneCatalog::load(config.scenes_path()).with_context(|| {
        format!("Failed to load scene catalog from {}", config.scenes_path())
    })?);
    info!(path = %config.scenes_path(), scenes = scenes.len(), "Scene catalog loaded");

    let credits = Arc::new(CreditManager::new(ledger, ext.credits.clone()));
    let text = Arc::new(TogetherClient::from_config(&ext.text));
    let generator = Arc::new(ImageGenerationClient::from_config(&ext.image));
    let archiver = Arc::new(B2ArchiveClient::new(ext.archive.clone()));

    let pipeline = Arc::new(ImagePipeline::new(generator, archiver));
    let queue = Arc::new(ImageJobQueue::start(pipeline, ext.queue.concurrency));

    let router = Arc::new(CommandRouter::new(
        credits.clone(),
        text,
        queue.clone(),
        scenes,
        config.admin_user_id(),
    ));

    Ok(BotComponents {
        teloxide_bot: build_teloxide_bot(config),
        credits,
        queue,
        router,
    })
}
