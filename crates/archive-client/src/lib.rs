//! # archive-client
//!
//! Copies a generated image from its temporary URL into durable blob storage and returns a
//! stable public URL. [`B2ArchiveClient`] talks to the Backblaze B2 native API.

use async_trait::async_trait;
use dbot_core::Result;

mod b2;
mod config;

pub use b2::B2ArchiveClient;
pub use config::{ArchiveConfig, DEFAULT_B2_API_URL, DEFAULT_B2_DOWNLOAD_URL};

/// Longest sanitized name kept in an object key.
pub const MAX_NAME_LEN: usize = 200;

/// Durable storage for generated assets.
#[async_trait]
pub trait Archiver: Send + Sync {
    /// Fetches `ephemeral_url` and stores it under a key derived from `name_hint`.
    async fn archive(&self, ephemeral_url: &str, name_hint: &str) -> Result<String>;
}

/// Drops every char that is not a word char, whitespace or `-`, then joins whitespace runs
/// with `_`.
pub fn sanitize_name(hint: &str) -> String {
    let kept: String = hint
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .collect();

    let mut out = String::with_capacity(kept.len());
    let mut in_space = false;
    for c in kept.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push('_');
                in_space = true;
            }
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out.chars().take(MAX_NAME_LEN).collect()
}

/// `images/{sanitized}_{unix_millis}.png`
pub fn object_key(name_hint: &str, unix_millis: i64) -> String {
    format!("images/{}_{}.png", sanitize_name(name_hint), unix_millis)
}
