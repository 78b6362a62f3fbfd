//! Error taxonomy for the fetch, summarize, and store operations.
//!
//! The topic deduplicator itself never fails; everything here belongs to the
//! I/O around it.

use thiserror::Error;

/// Errors surfaced by the completion client, the envelope parser, the store,
/// and configuration loading.
#[derive(Error, Debug)]
pub enum NewsError {
    #[error("PERPLEXITY_API_KEY is not set (pass --api-key or export the variable)")]
    MissingApiKey,

    #[error("URL is required")]
    MissingUrl,

    #[error("invalid article URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("authentication rejected by the completion API ({status})")]
    Auth { status: u16 },

    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("No content received from API")]
    EmptyCompletion,

    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("cannot read config {path}: {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("config error: {0}")]
    Config(#[from] serde_yaml::Error),
}

impl NewsError {
    /// Whether a retry has a chance of succeeding.
    ///
    /// Transport failures, rate limiting, and server errors are transient.
    /// Authentication failures, other client errors, and a success body that
    /// does not decode are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            NewsError::Http(e) => !e.is_decode() && !e.is_builder(),
            NewsError::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(status: u16) -> NewsError {
        NewsError::Api {
            status,
            message: format!("API request failed: {status}"),
        }
    }

    #[test]
    fn test_rate_limit_and_server_errors_are_retryable() {
        assert!(api(429).is_retryable());
        assert!(api(500).is_retryable());
        assert!(api(503).is_retryable());
    }

    #[test]
    fn test_client_errors_are_not_retryable() {
        assert!(!api(400).is_retryable());
        assert!(!api(404).is_retryable());
        assert!(!NewsError::Auth { status: 401 }.is_retryable());
        assert!(!NewsError::EmptyCompletion.is_retryable());
        assert!(!NewsError::MissingApiKey.is_retryable());
    }

    #[test]
    fn test_api_error_displays_message() {
        let e = NewsError::Api {
            status: 502,
            message: "API request failed: 502 Bad Gateway".to_string(),
        };
        assert_eq!(e.to_string(), "API request failed: 502 Bad Gateway");
    }
}
