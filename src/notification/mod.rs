//! # Notification Pipeline
//!
//! This module turns an inbound alert batch into Telegram messages and delivers
//! them.
//!
//! ## Core Components
//!
//! - **Formatter** (`formatter`): renders an `Alert` into an HTML message body.
//!   Pure and total; missing fields render as fixed defaults.
//! - **Classifier** (`classifier`): partitions a batch by severity and emits
//!   the ordered list of `OutboundMessage`s (critical, grouped warnings, other).
//! - **`RateLimiter`**: a sliding-window counter per destination shared by all
//!   concurrent requests.
//! - **`MessageTransport` Trait**: a single delivery attempt. `TelegramTransport`
//!   implements it over the Bot API `sendMessage` call.
//! - **`DeliveryClient`**: checks configuration, claims a rate-limit slot and
//!   drives the transport through bounded retries with exponential backoff.
//!
//! ## Workflow
//!
//! 1. `classify` produces messages for a batch, critical first.
//! 2. For each message `DeliveryClient::deliver` is called in order.
//! 3. Missing credentials fail the message as `misconfigured` without touching
//!    the limiter or the network.
//! 4. The limiter admits or rejects; a rejection is terminal (`rate-limited`).
//! 5. The transport is tried up to `max_retries` times, sleeping
//!    `initial_backoff * 2^n` between attempts.

pub mod classifier;
pub mod delivery;
pub mod error;
pub mod formatter;
pub mod rate_limiter;
pub mod transport;

pub use classifier::{MAX_GROUPED_WARNINGS, SeverityGroups, classify, default_silent};
pub use delivery::{DeliveryClient, Destination};
pub use error::TransportError;
pub use formatter::{format_alert, format_group};
pub use rate_limiter::{RATE_LIMIT_WINDOW, RateLimiter};
pub use transport::{MessageTransport, TelegramTransport};
