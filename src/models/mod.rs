//! This module contains the data models for Herald.

pub mod alert;
pub mod notification;

pub use alert::{Alert, AlertStatus, NotificationBatch, Severity};
pub use notification::{DeliveryOutcome, FailureReason, OutboundMessage};
