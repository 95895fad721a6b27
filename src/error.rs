//! Error types for q-rand

use thiserror::Error;

/// Main error type for q-rand operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Token file not found: {0}")]
    TokenNotFound(String),

    #[error("Failed to read token file {path}: {source}")]
    TokenUnreadable {
        path: String,
        source: std::io::Error,
    },

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("API error ({code}): {message}")]
    Api { code: u16, message: String },

    #[error("No backend selected")]
    NoBackendSelected,

    #[error("Job submission failed: {0}")]
    JobSubmission(String),

    #[error("Job '{0}' failed: {1}")]
    JobFailed(String, String),

    #[error("Job '{0}' timed out after {1} seconds")]
    JobTimeout(String, u64),

    #[error("Source error: {0}")]
    Source(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for q-rand operations
pub type Result<T> = std::result::Result<T, Error>;
