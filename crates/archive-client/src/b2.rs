use async_trait::async_trait;
use dbot_core::{mask_token, DbotError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, instrument};

use crate::config::ArchiveConfig;
use crate::{object_key, Archiver};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthorizeResponse {
    authorization_token: String,
    api_url: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UploadUrlRequest<'a> {
    bucket_id: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadUrlResponse {
    upload_url: String,
    authorization_token: String,
}

/// Backblaze B2 native API archiver.
///
/// Each call authorizes afresh; authorization tokens are not cached.
#[derive(Clone)]
pub struct B2ArchiveClient {
    http: reqwest::Client,
    config: ArchiveConfig,
}

fn storage_err(step: &str, err: impl std::fmt::Display) -> DbotError {
    DbotError::storage(format!("{}: {}", step, err))
}

async fn ensure_success(step: &str, response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(DbotError::storage(format!(
        "{}: HTTP {} {}",
        step,
        status.as_u16(),
        body
    )))
}

impl B2ArchiveClient {
    pub fn new(config: ArchiveConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self { http, config }
    }

    async fn authorize(&self) -> Result<AuthorizeResponse> {
        let url = format!(
            "{}/b2api/v2/b2_authorize_account",
            self.config.api_url.trim_end_matches('/')
        );
        info!(key_id = %mask_token(&self.config.key_id), "Authorizing with Backblaze B2");

        let response = self
            .http
            .get(&url)
            .basic_auth(&self.config.key_id, Some(&self.config.application_key))
            .send()
            .await
            .map_err(|e| storage_err("authorize", e))?;
        ensure_success("authorize", response)
            .await?
            .json()
            .await
            .map_err(|e| storage_err("authorize", e))
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        info!(image_url = %url, "Fetching image data");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| storage_err("fetch", e))?;
        let bytes = ensure_success("fetch", response)
            .await?
            .bytes()
            .await
            .map_err(|e| storage_err("fetch", e))?;
        Ok(bytes.to_vec())
    }

    async fn upload_url(&self, auth: &AuthorizeResponse) -> Result<UploadUrlResponse> {
        let url = format!(
            "{}/b2api/v2/b2_get_upload_url",
            auth.api_url.trim_end_matches('/')
        );
        let response = self
            .http
            .post(&url)
            .header("Authorization", &auth.authorization_token)
            .json(&UploadUrlRequest {
                bucket_id: &self.config.bucket_id,
            })
            .send()
            .await
            .map_err(|e| storage_err("get_upload_url", e))?;
        ensure_success("get_upload_url", response)
            .await?
            .json()
            .await
            .map_err(|e| storage_err("get_upload_url", e))
    }

    async fn upload(&self, target: &UploadUrlResponse, key: &str, data: Vec<u8>) -> Result<()> {
        info!(file_name = %key, size = data.len(), "Uploading image to Backblaze B2");
        let response = self
            .http
            .post(&target.upload_url)
            .header("Authorization", &target.authorization_token)
            .header("X-Bz-File-Name", key)
            .header("Content-Type", "image/png")
            .header("X-Bz-Content-Sha1", "do_not_verify")
            .body(data)
            .send()
            .await
            .map_err(|e| storage_err("upload", e))?;
        ensure_success("upload", response).await?;
        Ok(())
    }
}

#[async_trait]
impl Archiver for B2ArchiveClient {
    #[instrument(skip(self))]
    async fn archive(&self, ephemeral_url: &str, name_hint: &str) -> Result<String> {
        let auth = self.authorize().await?;
        let data = self.fetch_bytes(ephemeral_url).await?;
        let target = self.upload_url(&auth).await?;

        let key = object_key(name_hint, chrono::Utc::now().timestamp_millis());
        self.upload(&target, &key, data).await?;

        let durable = format!(
            "{}/file/{}/{}",
            self.config.download_url.trim_end_matches('/'),
            self.config.bucket_name,
            key
        );
        info!(durable_url = %durable, "Backup to Backblaze B2 succeeded");
        Ok(durable)
    }
}
