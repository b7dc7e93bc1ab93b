//! OpenAI images API client.
//!
//! Text-to-image: posts a prompt to `{base}/images/generations` and returns the temporary URL of
//! the single generated image.

use async_trait::async_trait;
use dbot_core::{mask_token, DbotError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

mod config;

pub use config::{
    EnvImageGenerationConfig, ImageGenerationConfig, DEFAULT_IMAGE_MODEL, DEFAULT_OPENAI_BASE_URL,
};

pub const DEFAULT_IMAGE_SIZE: &str = "1024x1024";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Generates an image for a prompt and returns its (ephemeral) URL.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate_image(&self, prompt: &str) -> Result<String>;
}

#[derive(Serialize)]
struct ImageRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u8,
    size: &'a str,
}

#[derive(Deserialize)]
struct ImageResponse {
    #[serde(default)]
    data: Vec<ImageData>,
}

#[derive(Deserialize)]
struct ImageData {
    url: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// OpenAI image generation client.
#[derive(Clone)]
pub struct ImageGenerationClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    size: String,
}

impl ImageGenerationClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_OPENAI_BASE_URL.to_string())
    }

    /// Client against an OpenAI-compatible base URL (e.g. a proxy or a test server).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            http,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: DEFAULT_IMAGE_MODEL.to_string(),
            size: DEFAULT_IMAGE_SIZE.to_string(),
        }
    }

    pub fn from_config(config: &dyn ImageGenerationConfig) -> Self {
        Self::with_base_url(config.api_key().to_string(), config.base_url().to_string())
            .with_model(config.model().to_string())
    }

    /// dall-e-2 or dall-e-3
    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    pub fn with_size(mut self, size: String) -> Self {
        self.size = size;
        self
    }
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| body.to_string())
}

#[async_trait]
impl ImageGenerator for ImageGenerationClient {
    #[tracing::instrument(skip(self))]
    async fn generate_image(&self, prompt: &str) -> Result<String> {
        tracing::info!(
            model = %self.model,
            size = %self.size,
            prompt_preview = %prompt.chars().take(100).collect::<String>(),
            api_key = %mask_token(&self.api_key),
            "OpenAI image generation request"
        );

        let request = ImageRequest {
            model: &self.model,
            prompt,
            n: 1,
            size: &self.size,
        };

        let response = self
            .http
            .post(format!("{}/images/generations", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| DbotError::upstream(e.status().map(|s| s.as_u16()), e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DbotError::upstream(Some(status.as_u16()), e.to_string()))?;

        if !status.is_success() {
            let message = error_message(&body);
            tracing::error!(status = status.as_u16(), error = %message, "OpenAI image generation failed");
            return Err(DbotError::upstream(Some(status.as_u16()), message));
        }

        let parsed: ImageResponse = serde_json::from_str(&body).map_err(|e| {
            DbotError::upstream(Some(status.as_u16()), format!("malformed response: {}", e))
        })?;

        match parsed.data.into_iter().next().and_then(|d| d.url) {
            Some(url) => {
                tracing::info!(image_url = %url, "OpenAI image generation completed");
                Ok(url)
            }
            None => Err(DbotError::upstream(
                Some(status.as_u16()),
                "No image URL in response",
            )),
        }
    }
}
