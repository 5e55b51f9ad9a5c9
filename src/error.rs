// src/error.rs
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScrapeError>;

#[derive(Debug, Error)]
pub enum ScrapeError {
    /// No CSRF token on the page, or the wait for one timed out.
    #[error("CSRF token not found on page")]
    TokenNotFound,

    #[error("Inbox fetch failed ({status})")]
    DiscoveryHttp { status: u16 },

    #[error("No reports found")]
    NoItemsFound,

    /// Per-report GraphQL failure. Absorbed by the batch scheduler.
    #[error("{0}")]
    Query(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Unexpected message type: {0}")]
    UnexpectedMessage(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
