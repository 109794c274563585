//! Pagination module
//!
//! Cursor-based pagination over the `{ "result": [...], "meta": {...} }`
//! envelope used by every list endpoint.
//!
//! # Overview
//!
//! A [`Pager`] is generic over the item type and a metadata type
//! implementing [`PageMetadata`]. It can be driven page by page with
//! [`Pager::get_next_page`] or flattened into a lazy item stream with
//! [`Pager::items`].

mod pager;
mod types;

pub use pager::Pager;
pub use types::{Item, Metadata, Page, PageInput, PageMetadata, CURSOR, LIMIT};

#[cfg(test)]
mod tests;
