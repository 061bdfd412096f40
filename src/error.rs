//! Error types for the 1WorldSync client
//!
//! All public APIs return `Result<T, Error>` where Error is defined here.
//! The variants follow the failure taxonomy of the upstream APIs: bad local
//! configuration, rejected signatures, non-2xx responses, and pagination
//! misuse are all distinct.

use thiserror::Error;

/// The main error type for the 1WorldSync client
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid or incomplete client configuration
    #[error("configuration error: {message}")]
    Config { message: String },

    /// A required credential is missing or empty
    #[error("missing credential: {field}")]
    MissingCredential { field: String },

    /// The upstream rejected the request signature (HTTP 401/403)
    #[error("authentication rejected (HTTP {status}): {message}")]
    Auth { status: u16, message: String },

    /// Any other non-2xx response, carrying the upstream message
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// Advancing a page sequence that is already exhausted
    #[error("pagination error: {message}")]
    Pagination { message: String },

    /// Transport-level failure from reqwest
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body could not be decoded
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A configured base URL is not a valid URL
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing credential error
    pub fn missing_credential(field: impl Into<String>) -> Self {
        Self::MissingCredential {
            field: field.into(),
        }
    }

    /// Create a pagination error
    pub fn pagination(message: impl Into<String>) -> Self {
        Self::Pagination {
            message: message.into(),
        }
    }

    /// Classify a non-2xx response: 401/403 mean the signature was rejected,
    /// everything else is a plain API error.
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        let message = body.into();
        match status {
            401 | 403 => Self::Auth { status, message },
            _ => Self::Api { status, message },
        }
    }

    /// Check if this error is worth retrying with a freshly signed request.
    ///
    /// The client never retries on its own; callers that want resilience
    /// re-issue the call themselves, which re-signs with a new timestamp.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(e) => e.is_timeout() || e.is_connect(),
            Error::Api { status, .. } => matches!(status, 429 | 500 | 502 | 503 | 504),
            _ => false,
        }
    }
}

/// Result type alias for the 1WorldSync client
pub type Result<T> = std::result::Result<T, Error>;
