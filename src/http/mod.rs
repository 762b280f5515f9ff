//! HTTP client module
//!
//! Thin wrapper over `reqwest` that builds URLs against a base, applies
//! bearer authentication and default headers, and turns non-2xx answers
//! into [`Error::HttpStatus`](crate::error::Error::HttpStatus).
//!
//! Every call is a single attempt: a transport failure or an error status
//! is returned to the caller immediately.

mod client;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};

#[cfg(test)]
mod tests;
