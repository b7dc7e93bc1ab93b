//! BotConfig: BaseConfig + AppExtensions. Use load() for env-based loading.

use anyhow::Result;

use super::{AppExtensions, BaseConfig};

pub struct BotConfig {
    pub base: BaseConfig,
    pub extensions: AppExtensions,
}

impl BotConfig {
    /// Load full config from environment variables. If `token` is provided it overrides BOT_TOKEN.
    /// Call validate() after load to check config before init.
    pub fn load(token: Option<String>) -> Result<Self> {
        let base = BaseConfig::load(token)?;
        let extensions = AppExtensions::from_env()?;
        Ok(Self { base, extensions })
    }

    /// Fails fast on malformed URLs, zero concurrency or non-positive costs.
    pub fn validate(&self) -> Result<()> {
        self.base.validate()?;
        self.extensions.credits.validate()?;
        if self.extensions.queue.concurrency == 0 {
            anyhow::bail!("IMAGE_QUEUE_CONCURRENCY must be at least 1");
        }
        for (name, url) in [
            ("TOGETHER_BASE_URL", self.extensions.text.together_base_url.as_str()),
            ("OPENAI_BASE_URL", self.extensions.image.openai_base_url.as_str()),
            ("B2_API_URL", self.extensions.archive.api_url.as_str()),
            ("B2_DOWNLOAD_URL", self.extensions.archive.download_url.as_str()),
        ] {
            if reqwest::Url::parse(url).is_err() {
                anyhow::bail!("{} is not a valid URL: {}", name, url);
            }
        }
        Ok(())
    }

    pub fn base(&self) -> &BaseConfig {
        &self.base
    }
    pub fn extensions(&self) -> &AppExtensions {
        &self.extensions
    }

    pub fn bot_token(&self) -> &str {
        &self.base.bot_token
    }
    pub fn database_url(&self) -> &str {
        &self.base.database_url
    }
    pub fn log_file(&self) -> &str {
        &self.base.log_file
    }
    pub fn telegram_api_url(&self) -> Option<&str> {
        self.base.telegram_api_url.as_deref()
    }
    pub fn admin_user_id(&self) -> &str {
        &self.base.admin_user_id
    }
    pub fn scenes_path(&self) -> &str {
        &self.base.scenes_path
    }
}
