//! HTTP transport module
//!
//! Provides the HTTP client the tRPC layer sends its envelopes through.
//!
//! # Features
//!
//! - **Automatic Retries**: transient failures (connect errors, timeouts,
//!   429/502/503/504) are retried with backoff
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Backoff Strategies**: Constant, linear, and exponential backoff

mod client;
mod rate_limit;

pub use client::{
    HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig, DEFAULT_BASE_URL,
    DEFAULT_USER_AGENT,
};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
