//! Processing of one inbound batch: classify, deliver every message, report.

use std::sync::Arc;

use thiserror::Error;

use crate::{
    models::{FailureReason, NotificationBatch},
    notification::{DeliveryClient, classify, default_silent},
};

/// Errors that abort the processing of a whole batch.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The task processing the batch panicked or was cancelled.
    #[error("Batch processing task failed: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),
}

/// Per-batch delivery tally. Only used for logging; callers of the webhook
/// learn whether the batch was accepted, not how each message fared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Messages produced by the classifier.
    pub messages: usize,
    /// Messages the destination accepted.
    pub delivered: usize,
    /// Messages dropped by the rate limiter.
    pub rate_limited: usize,
    /// Messages that failed for any other reason.
    pub failed: usize,
}

/// Drives batches through the classifier and the delivery client.
#[derive(Clone)]
pub struct AlertRelay {
    delivery: Arc<DeliveryClient>,
}

impl AlertRelay {
    /// Creates a new relay delivering through `delivery`.
    pub fn new(delivery: Arc<DeliveryClient>) -> Self {
        Self { delivery }
    }

    /// Classifies the batch and delivers every resulting message in order.
    ///
    /// A failed or rate-limited message never stops its siblings.
    #[tracing::instrument(skip_all, fields(group_key = %batch.group_key, alerts = batch.alerts.len()))]
    pub async fn process(&self, batch: NotificationBatch) -> BatchReport {
        let messages = classify(&batch);
        let mut report = BatchReport { messages: messages.len(), ..Default::default() };

        tracing::debug!(
            status = batch.status.as_str(),
            default_silent = default_silent(&batch),
            messages = report.messages,
            "Batch classified."
        );

        for message in messages {
            let outcome = self.delivery.deliver(message).await;
            match outcome.reason {
                None => report.delivered += 1,
                Some(FailureReason::RateLimited) => report.rate_limited += 1,
                Some(_) => report.failed += 1,
            }
        }

        tracing::info!(
            messages = report.messages,
            delivered = report.delivered,
            rate_limited = report.rate_limited,
            failed = report.failed,
            "Batch processed."
        );

        report
    }

    /// Processes the batch on its own task so a slow delivery never holds up
    /// the caller's executor thread, and a panic surfaces as an error.
    pub async fn dispatch(&self, batch: NotificationBatch) -> Result<BatchReport, RelayError> {
        let relay = self.clone();
        let report = tokio::spawn(async move { relay.process(batch).await }).await?;
        Ok(report)
    }
}
