//! Error types for exhibit-core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Empty response: {0}")]
    EmptyResponse(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
