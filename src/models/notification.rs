//! Data models for outbound messages and their delivery results.

use std::fmt;

use serde::Serialize;

/// A fully rendered message waiting to be delivered to the destination chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundMessage {
    /// The rendered message body.
    pub text: String,
    /// Whether the message should be delivered without an audible alert.
    pub silent: bool,
}

impl OutboundMessage {
    /// Creates a message that notifies the recipient.
    pub fn loud(text: impl Into<String>) -> Self {
        Self { text: text.into(), silent: false }
    }

    /// Creates a message delivered without a notification sound.
    pub fn silent(text: impl Into<String>) -> Self {
        Self { text: text.into(), silent: true }
    }
}

/// Why a message was not delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailureReason {
    /// The destination's sliding window was full.
    RateLimited,
    /// Every attempt failed with a network error, a timeout or a non-2xx status.
    TransportError,
    /// The destination accepted the request but explicitly refused the message.
    DestinationError,
    /// The bot token or chat id is not configured.
    Misconfigured,
}

impl FailureReason {
    /// Returns the kebab-case name of the reason.
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureReason::RateLimited => "rate-limited",
            FailureReason::TransportError => "transport-error",
            FailureReason::DestinationError => "destination-error",
            FailureReason::Misconfigured => "misconfigured",
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The result of delivering a single [`OutboundMessage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeliveryOutcome {
    /// Whether the destination accepted the message.
    pub succeeded: bool,
    /// Number of network attempts made.
    pub attempts: u32,
    /// Failure cause when `succeeded` is false.
    pub reason: Option<FailureReason>,
}

impl DeliveryOutcome {
    /// A successful delivery after `attempts` tries.
    pub fn delivered(attempts: u32) -> Self {
        Self { succeeded: true, attempts, reason: None }
    }

    /// A failed delivery.
    pub fn failed(reason: FailureReason, attempts: u32) -> Self {
        Self { succeeded: false, attempts, reason: Some(reason) }
    }
}
