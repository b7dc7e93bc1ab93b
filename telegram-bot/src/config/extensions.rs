//! Per-crate configs gathered for the application. Each is owned and parsed by its crate.

use anyhow::Result;
use archive_client::ArchiveConfig;
use credit_manager::CreditConfig;
use image_generation_client::EnvImageGenerationConfig;
use image_handlers::QueueConfig;
use llm_client::EnvTextGenerationConfig;

#[derive(Debug, Clone)]
pub struct AppExtensions {
    pub credits: CreditConfig,
    pub text: EnvTextGenerationConfig,
    pub image: EnvImageGenerationConfig,
    pub archive: ArchiveConfig,
    pub queue: QueueConfig,
}

impl AppExtensions {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            credits: CreditConfig::from_env()?,
            text: EnvTextGenerationConfig::from_env()?,
            image: EnvImageGenerationConfig::from_env()?,
            archive: ArchiveConfig::from_env()?,
            queue: QueueConfig::from_env()?,
        })
    }
}
