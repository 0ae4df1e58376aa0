#![warn(missing_docs)]
//! Herald relays Alertmanager webhook notifications to a Telegram chat.
//!
//! Each inbound batch is classified by severity, rendered as HTML and sent
//! through a rate-limited delivery client with bounded retries.

pub mod config;
pub mod http_client;
pub mod http_server;
pub mod models;
pub mod notification;
pub mod relay;
pub mod telemetry;
pub mod test_helpers;
