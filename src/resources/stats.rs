//! Usage statistics

use super::types::{PvDomainListInput, PvDomainListMetadata, PvDomainStat, PvGetInput, PvGetResponse};
use crate::config::RequestOptions;
use crate::error::Result;
use crate::http::HttpClient;
use crate::pagination::Pager;
use std::sync::Arc;

/// Statistics endpoints
#[derive(Debug, Clone)]
pub struct Stats {
    pv: Pv,
}

impl Stats {
    pub(crate) fn new(client: Arc<HttpClient>) -> Self {
        Self { pv: Pv::new(client) }
    }

    /// Page view statistics
    pub fn pv(&self) -> &Pv {
        &self.pv
    }
}

/// Page view statistics
#[derive(Debug, Clone)]
pub struct Pv {
    client: Arc<HttpClient>,
    domains: PvDomains,
}

impl Pv {
    fn new(client: Arc<HttpClient>) -> Self {
        Self {
            domains: PvDomains {
                client: Arc::clone(&client),
            },
            client,
        }
    }

    /// Page views broken down by domain
    pub fn domains(&self) -> &PvDomains {
        &self.domains
    }

    /// Total page views for the project
    pub async fn get(&self, input: &PvGetInput) -> Result<PvGetResponse> {
        self.get_with_options(input, &RequestOptions::default())
            .await
    }

    /// Total page views with per-call overrides
    pub async fn get_with_options(
        &self,
        input: &PvGetInput,
        options: &RequestOptions,
    ) -> Result<PvGetResponse> {
        self.client
            .get_with_options("/stats/pv", &input.to_query(), options)
            .await
    }
}

/// Per-domain page views
#[derive(Debug, Clone)]
pub struct PvDomains {
    client: Arc<HttpClient>,
}

impl PvDomains {
    /// List page views per domain
    pub fn list(&self, input: &PvDomainListInput) -> Pager<PvDomainStat, PvDomainListMetadata> {
        self.list_with_options(input, RequestOptions::default())
    }

    /// List page views per domain with per-call overrides
    pub fn list_with_options(
        &self,
        input: &PvDomainListInput,
        options: RequestOptions,
    ) -> Pager<PvDomainStat, PvDomainListMetadata> {
        Pager::new(Arc::clone(&self.client), "/stats/pv/domains", input.to_query())
            .with_options(options)
    }
}
