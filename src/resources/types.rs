//! Resource input and response types
//!
//! Inputs convert themselves to query parameters; metadata types embed the
//! standard pagination [`Metadata`] next to endpoint-specific context.

use crate::http::QueryParams;
use crate::pagination::{Metadata, PageInput, PageMetadata};
use serde::{Deserialize, Serialize};

// ============================================================================
// Domains
// ============================================================================

/// Input for listing registered domains
pub type DomainListInput = PageInput;

/// Metadata of a domain list page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainListMetadata {
    #[serde(flatten)]
    pub pagination: Metadata,
    pub project_id: String,
}

impl PageMetadata for DomainListMetadata {
    fn has_next_page(&self) -> bool {
        self.pagination.has_next_page()
    }

    fn next_page_cursor(&self) -> Option<&str> {
        self.pagination.next_page_cursor()
    }
}

/// Domains accepted by an add request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddDomainsResult {
    pub domains: Vec<String>,
}

#[derive(Serialize)]
pub(crate) struct DomainsBody<'a> {
    pub domains: &'a [String],
}

// ============================================================================
// Page view statistics
// ============================================================================

/// Date range for page view totals; months are formatted `YYYY-MM`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PvGetInput {
    pub from: Option<String>,
    pub to: Option<String>,
}

impl PvGetInput {
    /// Convert to query parameters
    pub fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        query.set_opt("from", self.from.as_deref());
        query.set_opt("to", self.to.as_deref());
        query
    }
}

/// Page view totals for the project
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PvGetResponse {
    pub pv: PvTotal,
    pub meta: PvGetMetadata,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PvTotal {
    pub total: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PvGetMetadata {
    pub project_id: String,
    pub from: String,
    pub to: String,
}

/// Input for listing page views per domain
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PvDomainListInput {
    pub page: PageInput,
    pub from: Option<String>,
    pub to: Option<String>,
    pub domain: Option<String>,
}

impl PvDomainListInput {
    /// Convert to query parameters
    pub fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        query.set_opt("from", self.from.as_deref());
        query.set_opt("to", self.to.as_deref());
        query.set_opt("domain", self.domain.as_deref());
        query.merge(self.page.to_query());
        query
    }
}

/// Page views of a single domain
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PvDomainStat {
    pub domain: String,
    pub value: i64,
}

/// Metadata of a per-domain page view page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PvDomainListMetadata {
    #[serde(flatten)]
    pub pagination: Metadata,
    pub project_id: String,
    pub from: String,
    pub to: String,
}

impl PageMetadata for PvDomainListMetadata {
    fn has_next_page(&self) -> bool {
        self.pagination.has_next_page()
    }

    fn next_page_cursor(&self) -> Option<&str> {
        self.pagination.next_page_cursor()
    }
}
