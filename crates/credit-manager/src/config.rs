//! Credit configuration: starting balance and per-command costs.

use anyhow::{Context, Result};
use std::env;

pub const DEFAULT_START_CREDITS: i64 = 250;
pub const DEFAULT_RENDER_COST: i64 = 10;
pub const DEFAULT_ASK_COST: i64 = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreditConfig {
    pub default_start_credits: i64,
    pub render_cost: i64,
    pub ask_cost: i64,
}

impl Default for CreditConfig {
    fn default() -> Self {
        Self {
            default_start_credits: DEFAULT_START_CREDITS,
            render_cost: DEFAULT_RENDER_COST,
            ask_cost: DEFAULT_ASK_COST,
        }
    }
}

impl CreditConfig {
    /// Load from environment variables: DEFAULT_START_CREDITS, RENDER_COST, ASK_COST.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            default_start_credits: parse_var("DEFAULT_START_CREDITS", DEFAULT_START_CREDITS)?,
            render_cost: parse_var("RENDER_COST", DEFAULT_RENDER_COST)?,
            ask_cost: parse_var("ASK_COST", DEFAULT_ASK_COST)?,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.default_start_credits <= 0 {
            anyhow::bail!(
                "DEFAULT_START_CREDITS must be positive, got {}",
                self.default_start_credits
            );
        }
        if self.render_cost < 0 || self.ask_cost < 0 {
            anyhow::bail!(
                "Command costs must not be negative (RENDER_COST={}, ASK_COST={})",
                self.render_cost,
                self.ask_cost
            );
        }
        Ok(())
    }
}

fn parse_var(name: &str, default: i64) -> Result<i64> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be an integer, got {:?}", name, raw)),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        env::remove_var("DEFAULT_START_CREDITS");
        env::remove_var("RENDER_COST");
        env::remove_var("ASK_COST");

        let config = CreditConfig::from_env().unwrap();

        assert_eq!(config, CreditConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_from_env_overrides_and_rejects_garbage() {
        env::set_var("DEFAULT_START_CREDITS", "100");
        env::set_var("RENDER_COST", "25");
        env::set_var("ASK_COST", "1");

        let config = CreditConfig::from_env().unwrap();
        assert_eq!(config.default_start_credits, 100);
        assert_eq!(config.render_cost, 25);
        assert_eq!(config.ask_cost, 1);

        env::set_var("RENDER_COST", "ten");
        assert!(CreditConfig::from_env().is_err());

        env::remove_var("DEFAULT_START_CREDITS");
        env::remove_var("RENDER_COST");
        env::remove_var("ASK_COST");
    }

    #[test]
    fn test_validate_rejects_non_positive_start() {
        let config = CreditConfig {
            default_start_credits: 0,
            ..CreditConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
