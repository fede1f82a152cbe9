//! Error types for the ad finder.

use thiserror::Error;

/// Result type alias for ad finder operations.
pub type Result<T> = std::result::Result<T, FinderError>;

/// Errors that can occur while discovering ad images.
#[derive(Error, Debug)]
pub enum FinderError {
    /// The search API reported that the request quota is used up (HTTP 429).
    #[error("Search API quota exceeded (429)")]
    QuotaExceeded,

    /// A provider answered with a non-success status.
    #[error("Provider error {status}: {body}")]
    Provider { status: u16, body: String },

    /// Network, timeout or connection failure.
    #[error("Transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// Failed to parse a response.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Invalid query.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Configuration could not be loaded.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// URL parsing error.
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl FinderError {
    /// Builds a `Provider` error from a status code and response body.
    pub fn provider(status: u16, body: impl Into<String>) -> Self {
        Self::Provider {
            status,
            body: body.into(),
        }
    }
}
