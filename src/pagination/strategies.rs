//! Pagination strategy implementations
//!
//! Each strategy handles one server pagination style.

use super::types::{take_field, take_items, Paginator, DEFAULT_ITEMS_KEY, NEXT_CURSOR_KEY};
use crate::error::Result;
use crate::marker::Marker;
use crate::native::Native;
use crate::template::substitute;
use tracing::debug;

// ============================================================================
// Cursor Pagination
// ============================================================================

/// Cursor-based pagination (`cursor` in, `nextCursor` out)
///
/// The first request carries an undefined cursor. Iteration stops only when
/// the server answers with a null `nextCursor`; any other value, including
/// an empty string, is sent back as the next cursor.
#[derive(Debug, Clone)]
pub struct CursorPaginator {
    template: Native,
    items_key: String,
    /// `None` once the server signalled the last page
    cursor: Option<Native>,
}

impl CursorPaginator {
    /// Create a cursor paginator reading items from `"items"`
    pub fn new(template: Native) -> Self {
        Self {
            template,
            items_key: DEFAULT_ITEMS_KEY.to_string(),
            cursor: Some(Native::Undefined),
        }
    }

    /// Read items from a different response key
    #[must_use]
    pub fn with_items_key(mut self, key: impl Into<String>) -> Self {
        self.items_key = key.into();
        self
    }

    /// Current cursor, `None` when exhausted
    pub fn cursor(&self) -> Option<&Native> {
        self.cursor.as_ref()
    }
}

impl Paginator for CursorPaginator {
    fn next_request(&self) -> Option<Native> {
        self.cursor
            .as_ref()
            .map(|cursor| substitute(&self.template, Marker::Cursor, cursor))
    }

    fn process_response(&mut self, mut response: Native) -> Result<Vec<Native>> {
        let items = take_items(&mut response, &self.items_key)?;
        let next = take_field(&mut response, NEXT_CURSOR_KEY)?;
        debug!(
            "Cursor page returned {} items, next cursor: {:?}",
            items.len(),
            next
        );

        self.cursor = if next.is_null() { None } else { Some(next) };
        Ok(items)
    }

    fn is_done(&self) -> bool {
        self.cursor.is_none()
    }
}

// ============================================================================
// Page Number Pagination
// ============================================================================

/// Page number pagination starting at page 1
///
/// Stops after the first page that comes back empty, so even an empty first
/// page costs one request.
#[derive(Debug, Clone)]
pub struct PagePaginator {
    template: Native,
    /// `None` once an empty page was seen
    page: Option<u64>,
}

impl PagePaginator {
    /// Create a page paginator
    pub fn new(template: Native) -> Self {
        Self {
            template,
            page: Some(1),
        }
    }

    /// Current page number, `None` when exhausted
    pub fn page(&self) -> Option<u64> {
        self.page
    }
}

impl Paginator for PagePaginator {
    fn next_request(&self) -> Option<Native> {
        self.page
            .map(|page| substitute(&self.template, Marker::Page, &Native::from(page)))
    }

    fn process_response(&mut self, mut response: Native) -> Result<Vec<Native>> {
        let items = take_items(&mut response, DEFAULT_ITEMS_KEY)?;
        debug!("Page {:?} returned {} items", self.page, items.len());

        self.page = if items.is_empty() {
            None
        } else {
            self.page.map(|page| page + 1)
        };
        Ok(items)
    }

    fn is_done(&self) -> bool {
        self.page.is_none()
    }
}
