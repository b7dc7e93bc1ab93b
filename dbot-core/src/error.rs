use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbotError {
    /// Text or image generation API failed: network, timeout, non-2xx or malformed payload.
    #[error("Upstream error (status {status:?}): {message}")]
    Upstream {
        status: Option<u16>,
        message: String,
    },

    /// Archival to blob storage failed (authorize, fetch or upload).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Credit ledger could not be read or written.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Invalid credit amount: {0}")]
    InvalidAmount(i64),

    #[error("Permission denied")]
    PermissionDenied,

    #[error("Bot error: {0}")]
    Bot(String),

    #[error("Handler error: {0}")]
    Handler(#[from] HandlerError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Job queue is closed")]
    QueueClosed,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DbotError {
    pub fn upstream(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HandlerError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Missing option: {0}")]
    MissingOption(String),

    #[error("Invalid value for option {name}: {value}")]
    InvalidOption { name: String, value: String },
}

pub type Result<T> = std::result::Result<T, DbotError>;
