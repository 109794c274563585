//! HTTP transport module
//!
//! Provides the authenticated transport every resource call goes through.
//!
//! # Features
//!
//! - **Bearer Authentication**: Token taken from the merged client options
//! - **Automatic Retries**: Bounded retries with backoff for idempotent calls
//! - **Per-attempt Timeout**: Configurable, 30 seconds by default
//! - **Error Normalization**: Non-2xx responses become [`ApiError`]

mod api_error;
mod client;
mod query;

pub use api_error::ApiError;
pub use client::HttpClient;
pub use query::QueryParams;
