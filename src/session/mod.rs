//! Session module
//!
//! A `Session` is the set of cookies a logged-in browser would send; the
//! `Identity` is who those cookies belong to.

mod types;

pub use types::{Identity, Session};

/// Path of the endpoint reporting the current login
pub const SESSION_PATH: &str = "/api/auth/session";
