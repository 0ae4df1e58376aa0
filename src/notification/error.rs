//! Error types for message delivery.

use reqwest::StatusCode;
use thiserror::Error;

/// A single delivery attempt failed.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The attempt did not complete within the per-request timeout.
    #[error("Request timed out")]
    Timeout,

    /// The request could not be sent or its response could not be read.
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The destination answered with a non-2xx status.
    #[error("Destination responded with status: {0}")]
    Status(StatusCode),

    /// The destination answered 2xx but reported the message as not accepted.
    #[error("Destination rejected the message: {0}")]
    Rejected(String),
}

impl TransportError {
    /// Whether another attempt may succeed.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, TransportError::Rejected(_))
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { TransportError::Timeout } else { TransportError::Network(err) }
    }
}
