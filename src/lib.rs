//! # Morisawa Fonts web font API client
//!
//! Typed access to the web font management API: registered domains and
//! usage statistics, with bearer authentication, per-attempt timeouts,
//! bounded retries and cursor-based pagination.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use futures::TryStreamExt;
//! use morisawafonts_webfont::{ClientOptions, DomainListInput, Result, WebfontClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = WebfontClient::new(ClientOptions::builder().api_token("...").build())?;
//!
//!     // Stream every registered domain across all pages
//!     let mut pager = client.domains().list(&DomainListInput::default());
//!     let mut items = std::pin::pin!(pager.items());
//!     while let Some(item) = items.try_next().await? {
//!         println!("{} ({})", item.value, item.meta.project_id);
//!     }
//!
//!     client.domains().add(&["example.com".to_string()]).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │ WebfontClient: domains()  stats().pv()  pv().domains()     │
//! └────────────────────────────────────────────────────────────┘
//!                 │                          │
//!        ┌────────┴─────────┐       ┌────────┴─────────┐
//!        │   Pager<T, M>    │──────▶│    HttpClient    │
//!        │ cursor, items()  │       │ auth, timeout,   │
//!        └──────────────────┘       │ retry, ApiError  │
//!                                   └──────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Client options and per-call overrides
pub mod config;

/// Authenticated HTTP transport
pub mod http;

/// Cursor pagination
pub mod pagination;

/// Per-resource wrappers
pub mod resources;

/// Top-level client
pub mod client;

// ============================================================================
// Re-exports
// ============================================================================

pub use client::WebfontClient;
pub use config::{BackoffType, ClientOptions, RequestOptions};
pub use error::{Error, Result};
pub use http::{ApiError, HttpClient, QueryParams};
pub use pagination::{Item, Metadata, Page, PageInput, PageMetadata, Pager};
pub use resources::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
