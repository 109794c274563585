//! Top-level API client

use crate::config::ClientOptions;
use crate::error::Result;
use crate::http::HttpClient;
use crate::resources::{Domains, Stats};
use std::sync::Arc;

/// Morisawa Fonts web font API client
///
/// Cloning is cheap; every clone shares one transport.
#[derive(Debug, Clone)]
pub struct WebfontClient {
    http: Arc<HttpClient>,
    domains: Domains,
    stats: Stats,
}

impl WebfontClient {
    /// Create a client from options
    pub fn new(options: ClientOptions) -> Result<Self> {
        let http = Arc::new(HttpClient::new(options)?);
        Ok(Self {
            domains: Domains::new(Arc::clone(&http)),
            stats: Stats::new(Arc::clone(&http)),
            http,
        })
    }

    /// Create a client configured from `MORISAWAFONTS_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(ClientOptions::from_env()?)
    }

    /// Domain management
    pub fn domains(&self) -> &Domains {
        &self.domains
    }

    /// Usage statistics
    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// The shared transport, for endpoints without a wrapper
    pub fn http(&self) -> &Arc<HttpClient> {
        &self.http
    }

    /// Release network resources held by this client
    ///
    /// The pool is released once the last clone and pager are gone.
    pub fn close(self) {
        let Self {
            http,
            domains,
            stats,
        } = self;
        drop(domains);
        drop(stats);
        if let Ok(http) = Arc::try_unwrap(http) {
            http.close();
        }
    }
}
