//! Splits a notification batch into severity groups and turns them into
//! outbound messages.
//!
//! Messages are emitted critical first, then a single grouped warning message,
//! then everything else. Rate-limit admission happens in that order, so critical
//! alerts get first claim on the remaining slots.

use crate::models::{Alert, AlertStatus, NotificationBatch, OutboundMessage, Severity};

use super::formatter::{format_alert, format_group};

/// How many warnings are rendered in full inside the grouped warning message.
pub const MAX_GROUPED_WARNINGS: usize = 5;

/// The alerts of a batch, partitioned by severity. Original order is kept
/// within each group.
#[derive(Debug, Default)]
pub struct SeverityGroups<'a> {
    /// Alerts labelled `severity="critical"`.
    pub critical: Vec<&'a Alert>,
    /// Alerts labelled `severity="warning"`.
    pub warning: Vec<&'a Alert>,
    /// Everything else, including alerts without a severity.
    pub other: Vec<&'a Alert>,
}

impl<'a> SeverityGroups<'a> {
    /// Stable, exhaustive partition of `alerts` by their severity label.
    pub fn partition(alerts: &'a [Alert]) -> Self {
        let mut groups = Self::default();
        for alert in alerts {
            match alert.severity() {
                Severity::Critical => groups.critical.push(alert),
                Severity::Warning => groups.warning.push(alert),
                Severity::Other => groups.other.push(alert),
            }
        }
        groups
    }

    /// Total number of alerts across all groups.
    pub fn len(&self) -> usize {
        self.critical.len() + self.warning.len() + self.other.len()
    }

    /// Whether every group is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Batch-level notification default: quiet unless something is critical or
/// the batch is firing. Per-group rules in [`classify`] take precedence.
pub fn default_silent(batch: &NotificationBatch) -> bool {
    let has_critical = batch.alerts.iter().any(|a| a.severity() == Severity::Critical);
    !has_critical && batch.status != AlertStatus::Firing
}

/// Turns a batch into the ordered list of messages to deliver.
///
/// Critical alerts are sent one per message and always notify. Warnings are
/// folded into a single silent message. Remaining alerts are sent one per
/// message, silently.
pub fn classify(batch: &NotificationBatch) -> Vec<OutboundMessage> {
    let groups = SeverityGroups::partition(&batch.alerts);
    let mut messages = Vec::with_capacity(groups.critical.len() + groups.other.len() + 1);

    messages.extend(groups.critical.iter().map(|alert| OutboundMessage::loud(format_alert(alert))));

    if !groups.warning.is_empty() {
        let title = format!("⚠️ <b>Warning Alerts ({})</b>", groups.warning.len());
        messages.push(OutboundMessage::silent(format_group(
            &title,
            &groups.warning,
            MAX_GROUPED_WARNINGS,
        )));
    }

    messages.extend(groups.other.iter().map(|alert| OutboundMessage::silent(format_alert(alert))));

    messages
}
