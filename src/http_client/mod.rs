//! This module builds the shared HTTP client used for outbound deliveries.

mod client;

pub use client::{HttpClientError, create_http_client};
