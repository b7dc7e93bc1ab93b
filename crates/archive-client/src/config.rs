use anyhow::{Context, Result};
use std::env;

pub const DEFAULT_B2_API_URL: &str = "https://api.backblazeb2.com";
pub const DEFAULT_B2_DOWNLOAD_URL: &str = "https://f005.backblazeb2.com";

/// Backblaze B2 credentials and bucket.
#[derive(Debug, Clone)]
pub struct ArchiveConfig {
    pub key_id: String,
    pub application_key: String,
    pub bucket_id: String,
    pub bucket_name: String,
    pub api_url: String,
    pub download_url: String,
}

impl ArchiveConfig {
    pub fn from_env() -> Result<Self> {
        let key_id = env::var("B2_APPLICATION_KEY_ID").context("B2_APPLICATION_KEY_ID not set")?;
        let application_key =
            env::var("B2_APPLICATION_KEY").context("B2_APPLICATION_KEY not set")?;
        let bucket_id = env::var("B2_BUCKET_ID").context("B2_BUCKET_ID not set")?;
        let bucket_name = env::var("B2_BUCKET_NAME").context("B2_BUCKET_NAME not set")?;
        let api_url = env::var("B2_API_URL").unwrap_or_else(|_| DEFAULT_B2_API_URL.to_string());
        let download_url =
            env::var("B2_DOWNLOAD_URL").unwrap_or_else(|_| DEFAULT_B2_DOWNLOAD_URL.to_string());

        Ok(Self {
            key_id,
            application_key,
            bucket_id,
            bucket_name,
            api_url,
            download_url,
        })
    }
}
