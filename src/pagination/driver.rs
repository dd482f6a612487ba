//! Drivers turning a [`Paginator`] into a lazy sequence of items
//!
//! [`PaginatedItems`] pulls pages through a blocking fetch function;
//! [`paginate_stream`] does the same over an async fetch. Both fetch nothing
//! until the first item is requested, buffer one page at a time, and stop
//! for good after the first error.

use super::strategies::{CursorPaginator, PagePaginator};
use super::types::Paginator;
use crate::error::{Error, Result};
use crate::native::Native;
use futures::stream::{self, Stream, TryStreamExt};
use std::collections::VecDeque;
use std::future::Future;
use std::iter::FusedIterator;

/// Iterator over the items of every page
pub struct PaginatedItems<P, F> {
    paginator: P,
    fetch: F,
    buffer: VecDeque<Native>,
    failed: bool,
    fetches: usize,
}

impl<P, F> PaginatedItems<P, F>
where
    P: Paginator,
    F: FnMut(Native) -> Result<Native>,
{
    /// Drive `paginator` with `fetch`
    pub fn new(paginator: P, fetch: F) -> Self {
        Self {
            paginator,
            fetch,
            buffer: VecDeque::new(),
            failed: false,
            fetches: 0,
        }
    }

    /// Number of fetch calls made so far
    pub fn fetches(&self) -> usize {
        self.fetches
    }

    /// Current paginator state
    pub fn paginator(&self) -> &P {
        &self.paginator
    }
}

impl<P, F> Iterator for PaginatedItems<P, F>
where
    P: Paginator,
    F: FnMut(Native) -> Result<Native>,
{
    type Item = Result<Native>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.buffer.pop_front() {
                return Some(Ok(item));
            }
            if self.failed {
                return None;
            }

            let request = self.paginator.next_request()?;
            self.fetches += 1;
            let page = (self.fetch)(request)
                .and_then(|response| self.paginator.process_response(response));

            match page {
                Ok(items) => self.buffer.extend(items),
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

impl<P, F> FusedIterator for PaginatedItems<P, F>
where
    P: Paginator,
    F: FnMut(Native) -> Result<Native>,
{
}

/// Iterate a cursor-paginated endpoint.
///
/// `template` must contain the `CURSOR` marker where the cursor belongs.
pub fn iterate_cursor<F>(
    fetch: F,
    template: Native,
    items_key: &str,
) -> PaginatedItems<CursorPaginator, F>
where
    F: FnMut(Native) -> Result<Native>,
{
    PaginatedItems::new(CursorPaginator::new(template).with_items_key(items_key), fetch)
}

/// Iterate a page-numbered endpoint.
///
/// `template` must contain the `PAGE` marker where the page number belongs.
pub fn iterate_page<F>(fetch: F, template: Native) -> PaginatedItems<PagePaginator, F>
where
    F: FnMut(Native) -> Result<Native>,
{
    PaginatedItems::new(PagePaginator::new(template), fetch)
}

/// Drive `paginator` with an async fetch, yielding items as a stream
pub fn paginate_stream<P, F, Fut>(paginator: P, fetch: F) -> impl Stream<Item = Result<Native>>
where
    P: Paginator,
    F: FnMut(Native) -> Fut,
    Fut: Future<Output = Result<Native>>,
{
    stream::try_unfold((paginator, fetch), |(paginator, fetch)| {
        next_page(paginator, fetch)
    })
    .map_ok(|items| stream::iter(items.into_iter().map(Ok::<Native, Error>)))
    .try_flatten()
}

async fn next_page<P, F, Fut>(mut paginator: P, mut fetch: F) -> Result<Option<(Vec<Native>, (P, F))>>
where
    P: Paginator,
    F: FnMut(Native) -> Fut,
    Fut: Future<Output = Result<Native>>,
{
    let Some(request) = paginator.next_request() else {
        return Ok(None);
    };
    let response = fetch(request).await?;
    let items = paginator.process_response(response)?;
    Ok(Some((items, (paginator, fetch))))
}
