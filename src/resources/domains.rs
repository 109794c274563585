//! Registered domains

use super::types::{AddDomainsResult, DomainListInput, DomainListMetadata, DomainsBody};
use crate::config::RequestOptions;
use crate::error::Result;
use crate::http::HttpClient;
use crate::pagination::Pager;
use std::sync::Arc;

const PATH: &str = "/domains";

/// Domain management operations
#[derive(Debug, Clone)]
pub struct Domains {
    client: Arc<HttpClient>,
}

impl Domains {
    pub(crate) fn new(client: Arc<HttpClient>) -> Self {
        Self { client }
    }

    /// List registered domains
    pub fn list(&self, input: &DomainListInput) -> Pager<String, DomainListMetadata> {
        self.list_with_options(input, RequestOptions::default())
    }

    /// List registered domains with per-call overrides
    pub fn list_with_options(
        &self,
        input: &DomainListInput,
        options: RequestOptions,
    ) -> Pager<String, DomainListMetadata> {
        Pager::new(Arc::clone(&self.client), PATH, input.to_query()).with_options(options)
    }

    /// Register domains
    pub async fn add(&self, domains: &[String]) -> Result<AddDomainsResult> {
        self.add_with_options(domains, &RequestOptions::default())
            .await
    }

    /// Register domains with per-call overrides
    pub async fn add_with_options(
        &self,
        domains: &[String],
        options: &RequestOptions,
    ) -> Result<AddDomainsResult> {
        self.client
            .post_with_options(PATH, &DomainsBody { domains }, options)
            .await
    }

    /// Remove domains
    pub async fn delete(&self, domains: &[String]) -> Result<()> {
        self.delete_with_options(domains, &RequestOptions::default())
            .await
    }

    /// Remove domains with per-call overrides
    pub async fn delete_with_options(
        &self,
        domains: &[String],
        options: &RequestOptions,
    ) -> Result<()> {
        self.client
            .delete_with_options(PATH, &DomainsBody { domains }, options)
            .await
    }
}
