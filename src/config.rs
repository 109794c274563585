//! Client configuration
//!
//! `ClientOptions` is the client-level snapshot (token, base URL, HTTP client
//! handle, timeout, retry). `RequestOptions` carries per-call overrides and is
//! applied with [`ClientOptions::merge`], which returns a new value and never
//! touches the defaults held by the client.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Default API origin
pub const DEFAULT_BASE_URL: &str = "https://api.morisawafonts.com/webfont/v1";

/// Default per-attempt timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default number of extra attempts
pub const DEFAULT_RETRY: u32 = 2;

/// Environment variable holding the API token
pub const ENV_API_TOKEN: &str = "MORISAWAFONTS_API_TOKEN";
/// Environment variable overriding the base URL
pub const ENV_BASE_URL: &str = "MORISAWAFONTS_BASE_URL";
/// Environment variable overriding the timeout, in seconds
pub const ENV_TIMEOUT_SECS: &str = "MORISAWAFONTS_TIMEOUT_SECS";
/// Environment variable overriding the retry count
pub const ENV_RETRY: &str = "MORISAWAFONTS_RETRY";

/// Backoff strategy between retry attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffType {
    /// Constant delay between retries
    Constant,
    /// Linear increase in delay
    Linear,
    /// Exponential increase in delay
    #[default]
    Exponential,
}

/// Client-level configuration
#[derive(Clone)]
pub struct ClientOptions {
    /// Bearer token sent with every request
    pub api_token: Option<String>,
    /// Base URL; request paths are appended to its path
    pub base_url: Url,
    /// Underlying HTTP client handle. A fresh client is built when unset.
    pub http_client: Option<reqwest::Client>,
    /// Per-attempt request timeout
    pub timeout: Duration,
    /// Number of extra attempts for retryable failures
    pub retry: u32,
    /// Initial delay for backoff
    pub initial_backoff: Duration,
    /// Maximum delay for backoff
    pub max_backoff: Duration,
    /// Type of backoff strategy
    pub backoff_type: BackoffType,
    /// User agent string
    pub user_agent: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            api_token: None,
            base_url: default_base_url(),
            http_client: None,
            timeout: DEFAULT_TIMEOUT,
            retry: DEFAULT_RETRY,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(2),
            backoff_type: BackoffType::Exponential,
            user_agent: format!(
                "{}-rust/{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION")
            ),
        }
    }
}

fn default_base_url() -> Url {
    Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid")
}

impl ClientOptions {
    /// Create a new options builder
    pub fn builder() -> ClientOptionsBuilder {
        ClientOptionsBuilder::default()
    }

    /// Load options from `MORISAWAFONTS_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load options through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut options = Self::default();

        if let Some(token) = lookup(ENV_API_TOKEN).filter(|t| !t.is_empty()) {
            options.api_token = Some(token);
        }

        if let Some(base) = lookup(ENV_BASE_URL) {
            options.base_url = Url::parse(&base)
                .map_err(|e| Error::invalid_config(ENV_BASE_URL, e.to_string()))?;
        }

        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = secs
                .trim()
                .parse()
                .map_err(|_| Error::invalid_config(ENV_TIMEOUT_SECS, format!("not a number: {secs}")))?;
            options.timeout = Duration::from_secs(secs);
        }

        if let Some(retry) = lookup(ENV_RETRY) {
            options.retry = retry
                .trim()
                .parse()
                .map_err(|_| Error::invalid_config(ENV_RETRY, format!("not a number: {retry}")))?;
        }

        Ok(options)
    }

    /// Apply per-call overrides, producing a new snapshot
    #[must_use]
    pub fn merge(&self, overrides: &RequestOptions) -> ClientOptions {
        let mut merged = self.clone();
        if let Some(token) = &overrides.api_token {
            merged.api_token = Some(token.clone());
        }
        if let Some(base_url) = &overrides.base_url {
            merged.base_url = base_url.clone();
        }
        if let Some(client) = &overrides.http_client {
            merged.http_client = Some(client.clone());
        }
        if let Some(timeout) = overrides.timeout {
            merged.timeout = timeout;
        }
        if let Some(retry) = overrides.retry {
            merged.retry = retry;
        }
        merged
    }

    /// The token if one is set and non-empty
    pub fn token(&self) -> Option<&str> {
        self.api_token.as_deref().filter(|t| !t.is_empty())
    }

    /// Calculate backoff delay for a given attempt
    pub fn calculate_backoff(&self, attempt: u32) -> Duration {
        let delay = match self.backoff_type {
            BackoffType::Constant => self.initial_backoff,
            BackoffType::Linear => self.initial_backoff * (attempt + 1),
            BackoffType::Exponential => {
                let factor = 2u32.saturating_pow(attempt);
                self.initial_backoff.saturating_mul(factor)
            }
        };

        std::cmp::min(delay, self.max_backoff)
    }
}

impl std::fmt::Debug for ClientOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientOptions")
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url.as_str())
            .field("has_http_client", &self.http_client.is_some())
            .field("timeout", &self.timeout)
            .field("retry", &self.retry)
            .field("backoff_type", &self.backoff_type)
            .finish_non_exhaustive()
    }
}

/// Builder for client options
#[derive(Default)]
pub struct ClientOptionsBuilder {
    options: ClientOptions,
}

impl ClientOptionsBuilder {
    /// Set the API token
    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.options.api_token = Some(token.into());
        self
    }

    /// Set the base URL
    pub fn base_url(mut self, url: Url) -> Self {
        self.options.base_url = url;
        self
    }

    /// Set the underlying HTTP client handle
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.options.http_client = Some(client);
        self
    }

    /// Set the per-attempt timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout = timeout;
        self
    }

    /// Set the retry count
    pub fn retry(mut self, retry: u32) -> Self {
        self.options.retry = retry;
        self
    }

    /// Set backoff configuration
    pub fn backoff(mut self, backoff_type: BackoffType, initial: Duration, max: Duration) -> Self {
        self.options.backoff_type = backoff_type;
        self.options.initial_backoff = initial;
        self.options.max_backoff = max;
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.options.user_agent = agent.into();
        self
    }

    /// Build the options
    pub fn build(self) -> ClientOptions {
        self.options
    }
}

/// Per-call overrides merged onto [`ClientOptions`]
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Override the API token
    pub api_token: Option<String>,
    /// Override the base URL
    pub base_url: Option<Url>,
    /// Use a different HTTP client handle for this call only
    pub http_client: Option<reqwest::Client>,
    /// Override the per-attempt timeout
    pub timeout: Option<Duration>,
    /// Override the retry count
    pub retry: Option<u32>,
}

impl RequestOptions {
    /// Create empty overrides
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the API token
    #[must_use]
    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Override the base URL
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Use a different HTTP client for this call
    #[must_use]
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Override the timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the retry count
    #[must_use]
    pub fn retry(mut self, retry: u32) -> Self {
        self.retry = Some(retry);
        self
    }
}
