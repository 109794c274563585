//! Error types for the web font API client
//!
//! Every public operation returns `Result<T, Error>`. API failures, transport
//! failures and local pager conditions are separate variants so callers can
//! pick their own retry or display strategy.

use crate::http::ApiError;
use thiserror::Error;

/// The main error type for the client
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("api token is required")]
    MissingApiToken,

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    /// Non-2xx response from the API
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Network level failure (connect, DNS, timeout), surfaced unchanged
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Pagination
    // ============================================================================
    /// `get_next_page` was called on an exhausted pager
    #[error("no more pages")]
    EndOfPages,
}

impl Error {
    /// Create an invalid config value error
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// The API error, if this is one
    pub fn as_api_error(&self) -> Option<&ApiError> {
        match self {
            Error::Api(err) => Some(err),
            _ => None,
        }
    }

    /// HTTP status code for API errors
    pub fn status_code(&self) -> Option<u16> {
        self.as_api_error().map(ApiError::status_code)
    }

    /// Check if this is a per-attempt timeout from the transport
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Http(e) if e.is_timeout())
    }

    /// Check if this error is worth retrying at the caller's level
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(e) => is_retryable_transport(e),
            Error::Api(err) => is_retryable_status(err.status_code()),
            _ => false,
        }
    }
}

/// Check if an HTTP status code is retryable
///
/// 429 and every 5xx except 501 Not Implemented.
pub(crate) fn is_retryable_status(status: u16) -> bool {
    status == 429 || ((500..600).contains(&status) && status != 501)
}

/// Check if a transport failure is transient (connect, timeout, reset)
pub(crate) fn is_retryable_transport(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect() || err.is_request()
}

/// Result type alias for the client
pub type Result<T> = std::result::Result<T, Error>;
