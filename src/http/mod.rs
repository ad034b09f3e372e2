//! HTTP request dispatch
//!
//! A slim JSON-over-HTTPS client used by every destination. Retries, backoff,
//! and rate limiting belong to the platform dispatcher, not to this crate.

mod client;

#[cfg(test)]
mod tests;

pub use client::{RequestClient, RequestClientConfig, RequestClientConfigBuilder, RequestConfig};
