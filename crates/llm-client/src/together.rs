//! Together inference API implementation of [`TextGenerator`].

use async_trait::async_trait;
use dbot_core::{mask_token, DbotError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::instrument;

use super::{TextGenerationParams, TextGenerator};
use crate::config::{TextGenerationConfig, DEFAULT_TEXT_MODEL, DEFAULT_TOGETHER_BASE_URL};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Serialize)]
struct InferenceRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    #[serde(flatten)]
    params: &'a TextGenerationParams,
}

#[derive(Deserialize)]
struct InferenceResponse {
    output: InferenceOutput,
}

#[derive(Deserialize)]
struct InferenceOutput {
    choices: Vec<InferenceChoice>,
}

#[derive(Deserialize)]
struct InferenceChoice {
    text: String,
}

/// Client for `POST {base}/inference`. Cheap to clone.
#[derive(Clone)]
pub struct TogetherClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    params: TextGenerationParams,
}

impl TogetherClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_TOGETHER_BASE_URL.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            http,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: DEFAULT_TEXT_MODEL.to_string(),
            params: TextGenerationParams::default(),
        }
    }

    pub fn from_config(config: &dyn TextGenerationConfig) -> Self {
        Self::with_base_url(config.api_key().to_string(), config.base_url().to_string())
            .with_model(config.model().to_string())
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    pub fn with_params(mut self, params: TextGenerationParams) -> Self {
        self.params = params;
        self
    }
}

#[async_trait]
impl TextGenerator for TogetherClient {
    #[instrument(skip(self, prompt))]
    async fn generate_text(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/inference", self.base_url);

        tracing::info!(
            model = %self.model,
            prompt_preview = %prompt.chars().take(100).collect::<String>(),
            api_key = %mask_token(&self.api_key),
            "Together inference request"
        );

        let body = InferenceRequest {
            model: &self.model,
            prompt,
            params: &self.params,
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| DbotError::upstream(e.status().map(|s| s.as_u16()), e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), body = %message, "Together inference failed");
            return Err(DbotError::upstream(Some(status.as_u16()), message));
        }

        let parsed: InferenceResponse = response.json().await.map_err(|e| {
            DbotError::upstream(Some(status.as_u16()), format!("malformed response: {}", e))
        })?;

        let text = parsed
            .output
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.text)
            .ok_or_else(|| DbotError::upstream(Some(status.as_u16()), "no choices in response"))?;

        tracing::info!(text_len = text.len(), "Together inference completed");
        Ok(text)
    }
}
