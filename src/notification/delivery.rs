//! Delivery of outbound messages with rate limiting and bounded retries.

use std::{sync::Arc, time::Duration};

use tokio::time::Instant;

use super::{
    error::TransportError,
    rate_limiter::RateLimiter,
    transport::{MessageTransport, TelegramTransport},
};
use crate::{
    config::{DeliveryRetryConfig, TelegramConfig},
    models::{DeliveryOutcome, FailureReason, OutboundMessage},
    telemetry,
};

/// A configured destination: the chat messages go to and the transport that
/// reaches it.
pub struct Destination {
    /// Identity of the destination. Also the rate-limit key.
    pub chat_id: String,
    /// Transport used for each delivery attempt.
    pub transport: Arc<dyn MessageTransport>,
}

/// Sends messages to the destination, one call per message.
///
/// Each call checks configuration, claims a rate-limit slot, then makes up to
/// `max_retries` attempts with exponential backoff between them.
pub struct DeliveryClient {
    destination: Option<Destination>,
    rate_limiter: Arc<RateLimiter>,
    retry: DeliveryRetryConfig,
    request_timeout: Duration,
}

impl DeliveryClient {
    /// Creates a new `DeliveryClient`.
    ///
    /// # Arguments
    ///
    /// * `destination` - Where messages go, or `None` when credentials are
    ///   missing. Every delivery then fails as misconfigured.
    /// * `rate_limiter` - Shared admission control.
    /// * `retry` - Retry and backoff policy.
    /// * `request_timeout` - Upper bound for a single attempt.
    pub fn new(
        destination: Option<Destination>,
        rate_limiter: Arc<RateLimiter>,
        retry: DeliveryRetryConfig,
        request_timeout: Duration,
    ) -> Self {
        Self { destination, rate_limiter, retry, request_timeout }
    }

    /// Builds a client delivering through the Telegram Bot API.
    pub fn from_config(
        config: &TelegramConfig,
        http_client: reqwest::Client,
        rate_limiter: Arc<RateLimiter>,
        request_timeout: Duration,
    ) -> Self {
        let destination = match config.credentials() {
            Some((token, chat_id)) => Some(Destination {
                chat_id: chat_id.to_string(),
                transport: Arc::new(TelegramTransport::new(
                    http_client,
                    config.send_message_url(token),
                    chat_id,
                    config.parse_mode.as_str(),
                )),
            }),
            None => {
                tracing::warn!(
                    "TELEGRAM_BOT_TOKEN or TELEGRAM_CHAT_ID is not set; messages will not be delivered."
                );
                None
            }
        };

        Self::new(destination, rate_limiter, config.retry.clone(), request_timeout)
    }

    /// Whether a destination is configured.
    pub fn is_configured(&self) -> bool {
        self.destination.is_some()
    }

    /// Delivers a single message and reports what happened.
    ///
    /// Misconfiguration and rate limiting are terminal and never reach the
    /// network. Transport failures are retried until the attempt budget is
    /// spent; a destination rejection stops immediately.
    pub async fn deliver(&self, message: OutboundMessage) -> DeliveryOutcome {
        let Some(destination) = &self.destination else {
            metrics::counter!(telemetry::MESSAGES_SENT_TOTAL, "status" => "error").increment(1);
            tracing::error!("Telegram destination is not configured, dropping message.");
            return DeliveryOutcome::failed(FailureReason::Misconfigured, 0);
        };

        if !self.rate_limiter.try_admit(&destination.chat_id, Instant::now()) {
            metrics::counter!(telemetry::RATE_LIMITED_TOTAL).increment(1);
            tracing::warn!(
                destination = %destination.chat_id,
                limit = self.rate_limiter.ceiling(),
                "Rate limit exceeded, skipping message."
            );
            return DeliveryOutcome::failed(FailureReason::RateLimited, 0);
        }

        let max_attempts = self.retry.max_attempts();
        let mut attempt = 0;
        loop {
            let error = match self.attempt(destination, &message).await {
                Ok(()) => {
                    metrics::counter!(telemetry::DELIVERY_ATTEMPTS_TOTAL, "outcome" => "success")
                        .increment(1);
                    metrics::counter!(telemetry::MESSAGES_SENT_TOTAL, "status" => "success")
                        .increment(1);
                    tracing::debug!(attempts = attempt + 1, silent = message.silent, "Message delivered.");
                    return DeliveryOutcome::delivered(attempt + 1);
                }
                Err(e) => e,
            };

            metrics::counter!(telemetry::DELIVERY_ATTEMPTS_TOTAL, "outcome" => "error").increment(1);
            attempt += 1;

            if !error.is_retryable() {
                metrics::counter!(telemetry::MESSAGES_SENT_TOTAL, "status" => "error").increment(1);
                tracing::error!(error = %error, attempts = attempt, "Destination rejected message.");
                return DeliveryOutcome::failed(FailureReason::DestinationError, attempt);
            }

            if attempt >= max_attempts {
                metrics::counter!(telemetry::MESSAGES_SENT_TOTAL, "status" => "error").increment(1);
                tracing::error!(
                    error = %error,
                    max_retries = max_attempts,
                    "Failed to send to Telegram after exhausting all attempts."
                );
                return DeliveryOutcome::failed(FailureReason::TransportError, attempt);
            }

            let backoff = self.retry.backoff(attempt - 1);
            tracing::warn!(
                error = %error,
                attempt,
                max_retries = max_attempts,
                backoff_ms = backoff.as_millis() as u64,
                "Failed to send message, retrying."
            );
            tokio::time::sleep(backoff).await;
        }
    }

    async fn attempt(
        &self,
        destination: &Destination,
        message: &OutboundMessage,
    ) -> Result<(), TransportError> {
        match tokio::time::timeout(self.request_timeout, destination.transport.send(message)).await {
            Ok(result) => result,
            Err(_) => Err(TransportError::Timeout),
        }
    }
}
