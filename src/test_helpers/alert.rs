//! Builders for `Alert` and `NotificationBatch` instances in tests.

use crate::models::{Alert, AlertStatus, NotificationBatch};

/// A builder for creating `Alert` instances in tests.
pub struct AlertBuilder {
    alert: Alert,
}

impl AlertBuilder {
    /// Creates a firing alert with the given `alertname`.
    pub fn new(name: &str) -> Self {
        let mut alert = Alert { status: AlertStatus::Firing, ..Default::default() };
        alert.labels.insert("alertname".to_string(), name.to_string());
        Self { alert }
    }

    /// Sets the alert status.
    pub fn status(mut self, status: AlertStatus) -> Self {
        self.alert.status = status;
        self
    }

    /// Sets the `severity` label.
    pub fn severity(self, severity: &str) -> Self {
        self.label("severity", severity)
    }

    /// Sets the `instance` label.
    pub fn instance(self, instance: &str) -> Self {
        self.label("instance", instance)
    }

    /// Sets the `job` label.
    pub fn job(self, job: &str) -> Self {
        self.label("job", job)
    }

    /// Sets an arbitrary label.
    pub fn label(mut self, key: &str, value: &str) -> Self {
        self.alert.labels.insert(key.to_string(), value.to_string());
        self
    }

    /// Sets the `summary` annotation.
    pub fn summary(self, summary: &str) -> Self {
        self.annotation("summary", summary)
    }

    /// Sets the `description` annotation.
    pub fn description(self, description: &str) -> Self {
        self.annotation("description", description)
    }

    /// Sets an arbitrary annotation.
    pub fn annotation(mut self, key: &str, value: &str) -> Self {
        self.alert.annotations.insert(key.to_string(), value.to_string());
        self
    }

    /// Sets `startsAt`.
    pub fn starts_at(mut self, starts_at: &str) -> Self {
        self.alert.starts_at = Some(starts_at.to_string());
        self
    }

    /// Sets `endsAt`.
    pub fn ends_at(mut self, ends_at: &str) -> Self {
        self.alert.ends_at = Some(ends_at.to_string());
        self
    }

    /// Builds the `Alert`.
    pub fn build(self) -> Alert {
        self.alert
    }
}

/// A builder for creating `NotificationBatch` instances in tests.
#[derive(Default)]
pub struct BatchBuilder {
    batch: NotificationBatch,
}

impl BatchBuilder {
    /// Creates an empty batch with version `"4"`.
    pub fn new() -> Self {
        Self {
            batch: NotificationBatch {
                version: Some("4".to_string()),
                group_key: "{}:{alertname=\"test\"}".to_string(),
                ..Default::default()
            },
        }
    }

    /// Sets the batch status.
    pub fn status(mut self, status: AlertStatus) -> Self {
        self.batch.status = status;
        self
    }

    /// Sets the group key.
    pub fn group_key(mut self, group_key: &str) -> Self {
        self.batch.group_key = group_key.to_string();
        self
    }

    /// Appends an alert.
    pub fn alert(mut self, alert: Alert) -> Self {
        self.batch.alerts.push(alert);
        self
    }

    /// Builds the `NotificationBatch`.
    pub fn build(self) -> NotificationBatch {
        self.batch
    }
}
