//! # Text generation client
//!
//! Defines the [`TextGenerator`] trait and a Together inference implementation. Transport-agnostic;
//! used by the command router's `ask` command.

use async_trait::async_trait;
use dbot_core::Result;
use serde::Serialize;

mod config;
mod together;

pub use config::{
    EnvTextGenerationConfig, TextGenerationConfig, DEFAULT_TEXT_MODEL, DEFAULT_TOGETHER_BASE_URL,
};
pub use together::TogetherClient;

/// Sampling parameters sent with every completion request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextGenerationParams {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_tokens: u32,
    pub repetition_penalty: f32,
}

impl Default for TextGenerationParams {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_p: 0.7,
            top_k: 50,
            max_tokens: 15,
            repetition_penalty: 1.0,
        }
    }
}

/// Text generation interface: returns the first completion's text for a prompt.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate_text(&self, prompt: &str) -> Result<String>;
}
