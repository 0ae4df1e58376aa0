//! Construction of the base `reqwest` client from [`BaseHttpClientConfig`].

use reqwest::{Client, Proxy};
use thiserror::Error;

use crate::config::BaseHttpClientConfig;

/// Errors that can occur while building the HTTP client.
#[derive(Debug, Error)]
pub enum HttpClientError {
    /// The configured proxy URL could not be used.
    #[error("Invalid proxy '{proxy}': {source}")]
    InvalidProxy {
        /// The rejected proxy URL.
        proxy: String,
        /// The underlying error.
        source: reqwest::Error,
    },

    /// An error occurred while building the underlying `reqwest::Client`.
    #[error("Failed to create HTTP client: {0}")]
    HttpClientBuildError(#[source] reqwest::Error),
}

/// Creates the HTTP client shared by every delivery.
///
/// The client is cheap to clone and pools connections internally, so a single
/// instance is built at startup and handed to the transport.
pub fn create_http_client(config: &BaseHttpClientConfig) -> Result<Client, HttpClientError> {
    let mut builder = Client::builder()
        .pool_max_idle_per_host(config.max_idle_per_host)
        .pool_idle_timeout(Some(config.idle_timeout))
        .connect_timeout(config.connect_timeout);

    if let Some(proxy) = &config.proxy {
        let proxy_config = Proxy::all(proxy.as_str())
            .map_err(|source| HttpClientError::InvalidProxy { proxy: proxy.clone(), source })?;
        tracing::info!(proxy = %proxy, "Using HTTP proxy for outbound requests.");
        builder = builder.proxy(proxy_config);
    }

    builder.build().map_err(HttpClientError::HttpClientBuildError)
}
