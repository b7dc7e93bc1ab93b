//! Text generation configuration: trait and env-based implementation.

use anyhow::{Context, Result};
use std::env;

pub const DEFAULT_TOGETHER_BASE_URL: &str = "https://api.together.xyz";
pub const DEFAULT_TEXT_MODEL: &str = "teknium/OpenHermes-2p5-Mistral-7B";

/// Text generation configuration interface.
pub trait TextGenerationConfig: Send + Sync {
    fn api_key(&self) -> &str;
    fn base_url(&self) -> &str;
    fn model(&self) -> &str;
}

/// Text generation config loaded from environment variables.
#[derive(Debug, Clone)]
pub struct EnvTextGenerationConfig {
    pub together_api_key: String,
    pub together_base_url: String,
    pub text_model: String,
}

impl TextGenerationConfig for EnvTextGenerationConfig {
    fn api_key(&self) -> &str {
        &self.together_api_key
    }
    fn base_url(&self) -> &str {
        &self.together_base_url
    }
    fn model(&self) -> &str {
        &self.text_model
    }
}

impl EnvTextGenerationConfig {
    /// Load from environment variables.
    pub fn from_env() -> Result<Self> {
        let together_api_key =
            env::var("TOGETHER_API_KEY").context("TOGETHER_API_KEY not set")?;
        let together_base_url = env::var("TOGETHER_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_TOGETHER_BASE_URL.to_string());
        let text_model = env::var("TEXT_MODEL").unwrap_or_else(|_| DEFAULT_TEXT_MODEL.to_string());
        Ok(Self {
            together_api_key,
            together_base_url,
            text_model,
        })
    }
}
