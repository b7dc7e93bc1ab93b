//! # command-router
//!
//! Parses a [`dbot_core::CommandEvent`] into a [`Command`] and runs it: credit-gated image and
//! text commands, the scene-based `selfie`, and the credit admin commands.

mod command;
mod router;

pub use command::{find_spec, usage_text, Command, CommandSpec, COMMANDS};
pub use router::{
    error_reply, CommandRouter, EMPTY_ANSWER, GENERIC_FAILURE, INSUFFICIENT_CREDITS,
    INVALID_AMOUNT, PERMISSION_DENIED,
};
