//! Error types for LIM

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid spending context: {0}")]
    InvalidContext(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("AI backend error: {0}")]
    Backend(String),
}

pub type Result<T> = std::result::Result<T, Error>;
