//! API-process error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ApiError>;
