//! Pagination types and traits
//!
//! Defines the core pagination abstraction shared by both strategies.

use crate::error::{Error, Result};
use crate::native::Native;

/// Default key holding the page items in a response
pub const DEFAULT_ITEMS_KEY: &str = "items";

/// Key holding the continuation token in cursor responses
pub const NEXT_CURSOR_KEY: &str = "nextCursor";

/// A pagination strategy: owns the template and the page/cursor state.
///
/// Strategies hold no transport logic. A driver asks for the next concrete
/// request, fetches it, and hands the decoded response back.
pub trait Paginator {
    /// Concrete request for the next page, or `None` once exhausted
    fn next_request(&self) -> Option<Native>;

    /// Consume a decoded response, advance the state, and return its items
    fn process_response(&mut self, response: Native) -> Result<Vec<Native>>;

    /// Whether no further requests will be made
    fn is_done(&self) -> bool;
}

/// Take the item list stored under `key` out of a response object
pub(crate) fn take_items(response: &mut Native, key: &str) -> Result<Vec<Native>> {
    match take_field(response, key)? {
        Native::Array(items) => Ok(items),
        other => Err(Error::unexpected(format!(
            "'{key}' is not an array: {other:?}"
        ))),
    }
}

/// Take a required field out of a response object
pub(crate) fn take_field(response: &mut Native, key: &str) -> Result<Native> {
    match response {
        Native::Object(map) => map
            .shift_remove(key)
            .ok_or_else(|| Error::unexpected(format!("paginated response has no '{key}' field"))),
        other => Err(Error::unexpected(format!(
            "paginated response is not an object: {other:?}"
        ))),
    }
}
