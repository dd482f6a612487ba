//! tRPC client module
//!
//! `TrpcClient` wraps the HTTP transport with the superjson envelope codec
//! and the pagination drivers, and exposes the site's endpoints as methods.
//!
//! ```rust,ignore
//! use civitai_client::{ClientConfig, TrpcClient};
//! use futures::TryStreamExt;
//!
//! let client = TrpcClient::new(&ClientConfig::from_env()?)?;
//! let posts: Vec<_> = client.iter_posts("someone").try_collect().await?;
//! ```

mod endpoints;
mod trpc;
mod types;

pub use endpoints::{same_model_name, same_tag_name};
pub use trpc::TrpcClient;
pub use types::{ImageQuery, ModelDraft, ModelQuery, TagQuery, VersionDraft};

#[cfg(test)]
mod tests;
