//! Cursor pager
//!
//! Walks a paginated endpoint one page at a time. After each successful
//! fetch the `cursor` query parameter is replaced with the page's next
//! cursor; once a page reports no further pages the pager is exhausted and
//! never touches the network again.

use super::types::{Item, Page, PageMetadata, CURSOR};
use crate::config::RequestOptions;
use crate::error::{Error, Result};
use crate::http::{HttpClient, QueryParams};
use futures::stream::{self, Stream, TryStreamExt};
use serde::de::DeserializeOwned;
use std::borrow::BorrowMut;
use std::collections::VecDeque;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, warn};

/// Stateful walker over the pages of one list operation
///
/// `T` is the item type and `M` the page metadata type. A pager is a single
/// sequential cursor: build a new one to walk the list again.
pub struct Pager<T, M> {
    client: Arc<HttpClient>,
    path: String,
    query: QueryParams,
    options: RequestOptions,
    has_next: bool,
    _marker: PhantomData<fn() -> (T, M)>,
}

impl<T, M> Pager<T, M>
where
    T: DeserializeOwned,
    M: PageMetadata + DeserializeOwned + Default,
{
    /// Create a pager for `path` starting from `query`
    pub fn new(client: Arc<HttpClient>, path: impl Into<String>, query: QueryParams) -> Self {
        Self {
            client,
            path: path.into(),
            query,
            options: RequestOptions::default(),
            has_next: true,
            _marker: PhantomData,
        }
    }

    /// Apply per-call overrides to every page fetch
    #[must_use]
    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns true if there are more pages to fetch
    pub fn has_next_page(&self) -> bool {
        self.has_next
    }

    /// Query sent with the next fetch
    pub fn query(&self) -> &QueryParams {
        &self.query
    }

    /// Fetch the next page
    ///
    /// Fails with [`Error::EndOfPages`] without a request once exhausted. The
    /// pager state only changes after a successful fetch, so a failed or
    /// cancelled call can be repeated.
    pub async fn get_next_page(&mut self) -> Result<Page<T, M>> {
        if !self.has_next {
            return Err(Error::EndOfPages);
        }

        let page: Page<T, M> = self
            .client
            .get_with_options(&self.path, &self.query, &self.options)
            .await?;

        match (page.meta.has_next_page(), page.meta.next_page_cursor()) {
            (true, Some(cursor)) => {
                debug!("Fetched {} items from {}, next cursor {}", page.result.len(), self.path, cursor);
                self.query.set(CURSOR, cursor);
            }
            (true, None) => {
                warn!("{} reported more pages without a cursor; stopping", self.path);
                self.has_next = false;
            }
            (false, _) => {
                debug!("Fetched last page of {} ({} items)", self.path, page.result.len());
                self.has_next = false;
            }
        }

        Ok(page)
    }
}

impl<T, M> Pager<T, M>
where
    T: DeserializeOwned + Send,
    M: PageMetadata + DeserializeOwned + Default + Clone + Send,
{
    /// Lazily stream every item across all remaining pages
    ///
    /// A page is fetched only when the previous page's items have been
    /// consumed. A failed fetch yields one `Err` and ends the stream.
    pub fn items(&mut self) -> impl Stream<Item = Result<Item<T, M>>> + Send + '_ {
        item_stream(self)
    }

    /// Like [`Pager::items`], taking ownership of the pager
    pub fn into_items(self) -> impl Stream<Item = Result<Item<T, M>>> + Send {
        item_stream(self)
    }

    /// Collect the values of all remaining items
    pub async fn collect_all(&mut self) -> Result<Vec<T>> {
        self.items().map_ok(|item| item.value).try_collect().await
    }
}

impl<T, M> std::fmt::Debug for Pager<T, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pager")
            .field("path", &self.path)
            .field("query", &self.query)
            .field("has_next", &self.has_next)
            .finish_non_exhaustive()
    }
}

struct ItemState<P, T, M> {
    pager: P,
    buffer: VecDeque<Item<T, M>>,
    failed: bool,
}

fn item_stream<P, T, M>(pager: P) -> impl Stream<Item = Result<Item<T, M>>>
where
    P: BorrowMut<Pager<T, M>>,
    T: DeserializeOwned,
    M: PageMetadata + DeserializeOwned + Default + Clone,
{
    let state = ItemState {
        pager,
        buffer: VecDeque::new(),
        failed: false,
    };

    stream::unfold(state, |mut state| async move {
        if state.failed {
            return None;
        }

        loop {
            if let Some(item) = state.buffer.pop_front() {
                return Some((Ok(item), state));
            }

            let pager: &mut Pager<T, M> = state.pager.borrow_mut();
            if !pager.has_next_page() {
                return None;
            }

            let fetched = pager.get_next_page().await;
            match fetched {
                Ok(page) => state.buffer.extend(page.into_items()),
                Err(err) => {
                    state.failed = true;
                    return Some((Err(err), state));
                }
            }
        }
    })
}
