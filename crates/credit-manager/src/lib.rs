//! # credit-manager
//!
//! Per-user credit rules on top of the storage crate's [`storage::CreditLedger`]: lazy
//! initialization at a default balance, deduction with an insufficient-funds `false`, top-up,
//! and the render/ask cost presets used by the command router.

mod config;
mod manager;

pub use config::{CreditConfig, DEFAULT_ASK_COST, DEFAULT_RENDER_COST, DEFAULT_START_CREDITS};
pub use manager::CreditManager;
