//! One image job end to end: generate → archive → deliver.

use archive_client::Archiver;
use dbot_core::{Interaction, Result};
use image_generation_client::ImageGenerator;
use std::sync::Arc;
use tracing::{error, info, instrument};

/// Delivered instead of a URL when generation or archival fails.
pub const FAILURE_NOTICE: &str = "Error in processing your request.";

/// A queued image request.
pub struct ImageJob {
    pub prompt: String,
    pub requester: Interaction,
}

impl ImageJob {
    pub fn new(prompt: impl Into<String>, requester: Interaction) -> Self {
        Self {
            prompt: prompt.into(),
            requester,
        }
    }
}

pub struct ImagePipeline {
    generator: Arc<dyn ImageGenerator>,
    archiver: Arc<dyn Archiver>,
}

impl ImagePipeline {
    pub fn new(generator: Arc<dyn ImageGenerator>, archiver: Arc<dyn Archiver>) -> Self {
        Self {
            generator,
            archiver,
        }
    }

    async fn produce(&self, prompt: &str) -> Result<String> {
        let ephemeral = self.generator.generate_image(prompt).await?;
        self.archiver.archive(&ephemeral, prompt).await
    }

    /// Runs one job and delivers exactly one message to its requester. Never fails; errors are
    /// logged and replaced by [`FAILURE_NOTICE`].
    #[instrument(skip(self, job), fields(prompt_preview = %job.prompt.chars().take(50).collect::<String>()))]
    pub async fn run(&self, job: ImageJob) {
        let text = match self.produce(&job.prompt).await {
            Ok(url) => {
                info!(durable_url = %url, "Image job completed");
                url
            }
            Err(e) => {
                error!(error = %e, prompt = %job.prompt, "Image job failed");
                FAILURE_NOTICE.to_string()
            }
        };

        if let Err(e) = job.requester.respond(&text).await {
            error!(error = %e, "Failed to deliver image job result");
        }
    }
}
