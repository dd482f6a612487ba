// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Civitai tRPC Client
//!
//! A client for the Civitai content platform's tRPC API: superjson
//! envelopes on the wire, lazy pagination over cursor- and page-based
//! listings, and a session layer built on browser cookies.
//!
//! ## Features
//!
//! - **Superjson Codec**: typed values (`Date`, `undefined`) survive the trip
//!   through JSON via a side-channel of path annotations
//! - **Request Templates**: `PAGE`, `CURSOR` and `OMIT` markers describe how a
//!   listing request changes from page to page
//! - **Lazy Pagination**: items are produced one at a time and pages are only
//!   fetched on demand, from a sync iterator or an async stream
//! - **Resilient Transport**: retries with backoff and token-bucket rate
//!   limiting
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use civitai_client::{ClientConfig, Result, TrpcClient};
//! use futures::TryStreamExt;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let mut client = TrpcClient::new(&ClientConfig::from_env()?)?;
//!     client.refresh_identity().await?;
//!
//!     let images: Vec<_> = client.iter_images_self()?.try_collect().await?;
//!     println!("{} images", images.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                  TrpcClient (endpoints)                      │
//! └──────────────────────────────────────────────────────────────┘
//!          │                    │                     │
//! ┌────────┴───────┬────────────┴─────────┬───────────┴─────────┐
//! │   Pagination   │  Template / Markers  │   Superjson Codec   │
//! ├────────────────┼──────────────────────┼─────────────────────┤
//! │ Cursor         │ PAGE / CURSOR        │ format / parse      │
//! │ Page number    │ OMIT stripping       │ Date / undefined    │
//! │ Iterator/Stream│                      │ path annotations    │
//! └────────────────┴──────────────────────┴─────────────────────┘
//!          │
//! ┌────────┴─────────────────────────────────────────────────────┐
//! │  HTTP transport (retry, backoff, rate limit) + Session       │
//! └──────────────────────────────────────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the client
pub mod error;

/// Common types and parameter enums
pub mod types;

/// Native value model
pub mod native;

/// Template markers
pub mod marker;

/// Template substitution
pub mod template;

/// Superjson envelope codec
pub mod superjson;

/// Pagination strategies and drivers
pub mod pagination;

/// Timestamp parsing and formatting
pub mod time;

/// HTTP client with retry and rate limiting
pub mod http;

/// Session cookies and identity
pub mod session;

/// Client configuration
pub mod config;

/// tRPC client and endpoints
pub mod client;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use client::{ImageQuery, ModelDraft, ModelQuery, TagQuery, TrpcClient, VersionDraft};
pub use config::ClientConfig;
pub use marker::{Marker, CURSOR, OMIT, PAGE, UNDEFINED};
pub use native::Native;
pub use pagination::{iterate_cursor, iterate_page, paginate_stream, Paginator};
pub use session::{Identity, Session};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
