//! # dbot-core
//!
//! Core types shared by every crate of the bot: [`CommandEvent`], the [`ReplySink`] /
//! [`Interaction`] reply capability, the [`DbotError`] taxonomy, token masking and tracing
//! initialization. Transport-agnostic.

pub mod error;
pub mod interaction;
pub mod logger;
pub mod mask;
pub mod types;

pub use error::{DbotError, HandlerError, Result};
pub use interaction::{AckState, Interaction, ReplySink};
pub use logger::init_tracing;
pub use mask::mask_token;
pub use types::{CommandEvent, OptionValue};
