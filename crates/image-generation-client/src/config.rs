use anyhow::{Context, Result};
use std::env;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_IMAGE_MODEL: &str = "dall-e-3";

/// Image generation configuration interface.
pub trait ImageGenerationConfig: Send + Sync {
    fn api_key(&self) -> &str;
    fn base_url(&self) -> &str;
    fn model(&self) -> &str;
}

/// Image generation config loaded from `OPENAI_API_KEY`, `OPENAI_BASE_URL` and `IMAGE_MODEL`.
#[derive(Debug, Clone)]
pub struct EnvImageGenerationConfig {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub image_model: String,
}

impl ImageGenerationConfig for EnvImageGenerationConfig {
    fn api_key(&self) -> &str {
        &self.openai_api_key
    }
    fn base_url(&self) -> &str {
        &self.openai_base_url
    }
    fn model(&self) -> &str {
        &self.image_model
    }
}

impl EnvImageGenerationConfig {
    pub fn from_env() -> Result<Self> {
        let openai_api_key = env::var("OPENAI_API_KEY").context("OPENAI_API_KEY not set")?;
        let openai_base_url =
            env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_OPENAI_BASE_URL.to_string());
        let image_model =
            env::var("IMAGE_MODEL").unwrap_or_else(|_| DEFAULT_IMAGE_MODEL.to_string());
        Ok(Self {
            openai_api_key,
            openai_base_url,
            image_model,
        })
    }
}
