//! Error types for the Civitai client
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use crate::native::Native;
use thiserror::Error;

/// The main error type for the Civitai client
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Envelope Codec Errors
    // ============================================================================
    #[error("Unknown superjson type tag: {tag}")]
    UnknownTag { tag: String },

    #[error("Cannot resolve meta path '{path}': {message}")]
    MalformedPath { path: String, message: String },

    #[error("Invalid envelope meta: {message}")]
    InvalidMeta { message: String },

    #[error("Invalid value for type tag '{tag}': {message}")]
    TagValue { tag: String, message: String },

    #[error("Unresolved template marker at '{path}'")]
    UnresolvedMarker { path: String },

    // ============================================================================
    // Response Shape Errors
    // ============================================================================
    #[error("Unexpected response: {message}")]
    UnexpectedResponse { message: String },

    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // API Errors
    // ============================================================================
    #[error("API error (HTTP {status}): {error:?}")]
    Api { status: u16, error: Native },

    // ============================================================================
    // Session Errors
    // ============================================================================
    #[error("Session error: {message}")]
    Session { message: String },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an unknown tag error
    pub fn unknown_tag(tag: impl Into<String>) -> Self {
        Self::UnknownTag { tag: tag.into() }
    }

    /// Create a malformed path error
    pub fn malformed_path(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedPath {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an invalid meta error
    pub fn invalid_meta(message: impl Into<String>) -> Self {
        Self::InvalidMeta {
            message: message.into(),
        }
    }

    /// Create a tag value error
    pub fn tag_value(tag: impl Into<String>, message: impl Into<String>) -> Self {
        Self::TagValue {
            tag: tag.into(),
            message: message.into(),
        }
    }

    /// Create an unexpected response error
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::UnexpectedResponse {
            message: message.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a session error
    pub fn session(message: impl Into<String>) -> Self {
        Self::Session {
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Errors raised by the envelope codec indicate a version mismatch or a
    /// broken invariant and must never be retried.
    pub fn is_codec_error(&self) -> bool {
        matches!(
            self,
            Error::UnknownTag { .. }
                | Error::MalformedPath { .. }
                | Error::InvalidMeta { .. }
                | Error::TagValue { .. }
                | Error::UnresolvedMarker { .. }
        )
    }

    /// Check if this error is retryable by a transport
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(_) | Error::Timeout { .. } => true,
            Error::HttpStatus { status, .. } => is_retryable_status(*status),
            _ => false,
        }
    }
}

/// Check if an HTTP status code is retryable
pub(crate) fn is_retryable_status(status: u16) -> bool {
    matches!(status, 429 | 502 | 503 | 504)
}

/// Result type alias for the Civitai client
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
