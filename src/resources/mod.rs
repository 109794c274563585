//! Resource module
//!
//! Thin per-resource wrappers over the transport and the pager.

mod domains;
mod stats;
mod types;

pub use domains::Domains;
pub use stats::{Pv, PvDomains, Stats};
pub use types::{
    AddDomainsResult, DomainListInput, DomainListMetadata, PvDomainListInput,
    PvDomainListMetadata, PvDomainStat, PvGetInput, PvGetMetadata, PvGetResponse, PvTotal,
};
