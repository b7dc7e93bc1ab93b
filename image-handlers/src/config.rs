use anyhow::{Context, Result};
use std::env;

pub const DEFAULT_QUEUE_CONCURRENCY: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueConfig {
    pub concurrency: usize,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_QUEUE_CONCURRENCY,
        }
    }
}

impl QueueConfig {
    /// Reads `IMAGE_QUEUE_CONCURRENCY`; must be at least 1.
    pub fn from_env() -> Result<Self> {
        let concurrency = match env::var("IMAGE_QUEUE_CONCURRENCY") {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .with_context(|| format!("IMAGE_QUEUE_CONCURRENCY is not a number: {}", raw))?,
            Err(_) => DEFAULT_QUEUE_CONCURRENCY,
        };
        if concurrency == 0 {
            anyhow::bail!("IMAGE_QUEUE_CONCURRENCY must be at least 1");
        }
        Ok(Self { concurrency })
    }
}
