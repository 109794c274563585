//! Pagination types and traits
//!
//! Defines the page envelope, the metadata contract every list endpoint's
//! `meta` object satisfies, and the `limit`/`cursor` input shared by list
//! operations.

use crate::http::QueryParams;
use serde::{Deserialize, Deserializer, Serialize};

/// Query parameter name for page size
pub const LIMIT: &str = "limit";

/// Query parameter name for the continuation cursor
pub const CURSOR: &str = "cursor";

/// Pagination metadata contract
///
/// When `has_next_page` is false the cursor is ignored.
pub trait PageMetadata {
    /// Returns whether more pages are available
    fn has_next_page(&self) -> bool;

    /// Returns the cursor for the next page, if any
    fn next_page_cursor(&self) -> Option<&str>;
}

/// Standard pagination metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// More pages exist
    pub has_next: bool,
    /// Cursor for the next page
    #[serde(default)]
    pub next_cursor: Option<String>,
}

impl Metadata {
    /// Metadata for a page followed by another one
    pub fn next(cursor: impl Into<String>) -> Self {
        Self {
            has_next: true,
            next_cursor: Some(cursor.into()),
        }
    }

    /// Metadata for the final page
    pub fn last() -> Self {
        Self::default()
    }
}

impl PageMetadata for Metadata {
    fn has_next_page(&self) -> bool {
        self.has_next
    }

    fn next_page_cursor(&self) -> Option<&str> {
        self.next_cursor.as_deref()
    }
}

/// A single page of results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>, M: Deserialize<'de>"))]
pub struct Page<T, M> {
    /// Items in server order; a null or missing `result` is an empty page
    #[serde(default, deserialize_with = "null_as_empty")]
    pub result: Vec<T>,
    /// Pagination metadata
    pub meta: M,
}

impl<T, M: Default> Default for Page<T, M> {
    fn default() -> Self {
        Self {
            result: Vec::new(),
            meta: M::default(),
        }
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

impl<T, M: Clone> Page<T, M> {
    /// Split the page into items tagged with its metadata
    pub fn into_items(self) -> Vec<Item<T, M>> {
        let meta = self.meta;
        self.result
            .into_iter()
            .map(|value| Item {
                value,
                meta: meta.clone(),
            })
            .collect()
    }
}

/// One value together with the metadata of the page it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item<T, M> {
    pub value: T,
    pub meta: M,
}

/// Pagination input shared by list operations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageInput {
    /// Maximum number of results per page
    pub limit: Option<u32>,
    /// Cursor to start from
    pub cursor: Option<String>,
}

impl PageInput {
    /// Create an empty input
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size
    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the starting cursor
    #[must_use]
    pub fn cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }

    /// Convert to query parameters
    pub fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        query.set_opt(LIMIT, self.limit);
        query.set_opt(CURSOR, self.cursor.as_deref());
        query
    }
}
