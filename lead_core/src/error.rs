//! Error types shared across the lead form core

use http::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LeadError>;

#[derive(Error, Debug)]
pub enum LeadError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Storage quota exceeded for key '{0}'")]
    QuotaExceeded(String),

    #[error("Storage is unavailable")]
    StorageUnavailable,

    #[error("Malformed draft: {0}")]
    MalformedDraft(String),

    #[error("Webhook responded with status {0}")]
    WebhookStatus(StatusCode),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Navigation failed: {0}")]
    Navigation(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LeadError {
    /// Whether the error came out of the delivery step rather than local state.
    pub fn is_dispatch_failure(&self) -> bool {
        matches!(
            self,
            LeadError::WebhookStatus(_) | LeadError::Http(_) | LeadError::Navigation(_)
        )
    }
}
