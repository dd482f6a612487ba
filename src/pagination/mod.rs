//! Pagination module
//!
//! Supports: Cursor (`cursor` / `nextCursor`), Page Number (`page`)
//!
//! # Overview
//!
//! A request template carries a `CURSOR` or `PAGE` marker. The strategy
//! substitutes its current state into the template, the injected fetch
//! function performs the request, and the strategy reads the items and the
//! next state from the decoded response. Strategies never retry; any fetch
//! error ends the sequence.

mod driver;
mod strategies;
mod types;

pub use driver::{iterate_cursor, iterate_page, paginate_stream, PaginatedItems};
pub use strategies::{CursorPaginator, PagePaginator};
pub use types::{Paginator, DEFAULT_ITEMS_KEY, NEXT_CURSOR_KEY};
