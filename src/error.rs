use crate::service::ServiceError;
use thiserror::Error;

/// Overbook application error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid setting: {0}")]
    InvalidSetting(String),

    #[error("Booking service error: {0}")]
    Service(#[from] ServiceError),

    #[error("Credential snapshot error: {0}")]
    Store(#[from] crate::store::StoreError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Credential store is empty; run the provision phase first")]
    NoAccounts,
}

impl Error {
    pub fn invalid_setting(key: &str, detail: impl std::fmt::Display) -> Self {
        Self::InvalidSetting(format!("{key}: {detail}"))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
