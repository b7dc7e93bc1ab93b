//! Core types: inbound command event and its typed option values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Typed value of a single command option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptionValue {
    String(String),
    Integer(i64),
    /// Opaque id of another platform user.
    User(String),
}

/// A slash-command invocation, already stripped of transport details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandEvent {
    pub command_name: String,
    pub user_id: String,
    pub username: Option<String>,
    pub options: HashMap<String, OptionValue>,
    pub received_at: DateTime<Utc>,
}

impl CommandEvent {
    pub fn new(command_name: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            command_name: command_name.into(),
            user_id: user_id.into(),
            username: None,
            options: HashMap::new(),
            received_at: Utc::now(),
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_option(mut self, name: impl Into<String>, value: OptionValue) -> Self {
        self.options.insert(name.into(), value);
        self
    }

    pub fn option(&self, name: &str) -> Option<&OptionValue> {
        self.options.get(name)
    }

    /// String option; `None` when absent or not a string.
    pub fn get_string(&self, name: &str) -> Option<&str> {
        match self.options.get(name) {
            Some(OptionValue::String(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn get_integer(&self, name: &str) -> Option<i64> {
        match self.options.get(name) {
            Some(OptionValue::Integer(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn get_user(&self, name: &str) -> Option<&str> {
        match self.options.get(name) {
            Some(OptionValue::User(id)) => Some(id.as_str()),
            _ => None,
        }
    }
}
