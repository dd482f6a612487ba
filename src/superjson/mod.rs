//! Superjson envelope codec
//!
//! Converts between [`Native`](crate::native::Native) values and the wire
//! envelope `{"json": ..., "meta": {"values": ...}}` used by tRPC endpoints.
//!
//! # Overview
//!
//! Plain JSON travels in `json` untouched. Values JSON cannot express (the
//! undefined sentinel, timestamps) are written in a wire-safe form and their
//! location is recorded in `meta.values`, either as a map from dotted paths to
//! a one-element tag list, or as a single tag list when the whole payload is
//! a typed value.

mod codec;
mod types;

pub use codec::{format, parse, parse_value};
pub use types::{Envelope, Meta, MetaValues, TypeTag};
