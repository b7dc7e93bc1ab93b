//! # image-handlers
//!
//! Background image jobs. [`ImageJobQueue`] runs [`ImagePipeline`] (generate with an
//! [`image_generation_client::ImageGenerator`], archive with an [`archive_client::Archiver`],
//! deliver through the job's [`dbot_core::Interaction`]) on a fixed number of workers.
//! [`SceneCatalog`] supplies prompts for the `selfie` command.

mod config;
mod pipeline;
mod queue;
mod scenes;

pub use config::{QueueConfig, DEFAULT_QUEUE_CONCURRENCY};
pub use pipeline::{ImageJob, ImagePipeline, FAILURE_NOTICE};
pub use queue::ImageJobQueue;
pub use scenes::{Scene, SceneCatalog};
