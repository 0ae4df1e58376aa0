//! Data models for the alert batches delivered by the Alertmanager webhook.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize, de::Error as _};

/// Label value that marks an alert as critical.
pub const SEVERITY_CRITICAL: &str = "critical";

/// Label value that marks an alert as a warning.
pub const SEVERITY_WARNING: &str = "warning";

/// The lifecycle state of an alert, or of a whole batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    /// The condition is currently active.
    Firing,
    /// The condition has cleared.
    Resolved,
    /// The condition is active but has not yet crossed its `for` duration.
    Pending,
    /// Anything the webhook source sent that is not one of the above.
    #[default]
    #[serde(other)]
    Unknown,
}

impl AlertStatus {
    /// Returns the wire representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertStatus::Firing => "firing",
            AlertStatus::Resolved => "resolved",
            AlertStatus::Pending => "pending",
            AlertStatus::Unknown => "unknown",
        }
    }
}

/// The severity group an alert is routed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// `severity="critical"`.
    Critical,
    /// `severity="warning"`.
    Warning,
    /// Any other severity, including a missing label.
    Other,
}

/// A single alert instance within a notification batch.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    /// Status of this individual alert.
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: AlertStatus,

    /// Identifying labels (`severity`, `alertname`, `instance`, `job`, ...).
    /// `null` maps and `null` values are treated as absent.
    #[serde(default, deserialize_with = "deserialize_string_map")]
    pub labels: HashMap<String, String>,

    /// Informational annotations (`summary`, `description`, ...).
    #[serde(default, deserialize_with = "deserialize_string_map")]
    pub annotations: HashMap<String, String>,

    /// When the alert started firing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starts_at: Option<String>,

    /// When the alert resolved. Absent or empty while still open.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ends_at: Option<String>,

    /// Link back to the rule that produced the alert.
    #[serde(rename = "generatorURL", default, skip_serializing_if = "Option::is_none")]
    pub generator_url: Option<String>,
}

impl Alert {
    /// The raw `severity` label, if present.
    pub fn severity_label(&self) -> Option<&str> {
        self.labels.get("severity").map(String::as_str)
    }

    /// The severity group this alert belongs to.
    pub fn severity(&self) -> Severity {
        match self.severity_label() {
            Some(SEVERITY_CRITICAL) => Severity::Critical,
            Some(SEVERITY_WARNING) => Severity::Warning,
            _ => Severity::Other,
        }
    }

    /// The `alertname` label, or `"Unknown Alert"`.
    pub fn name(&self) -> &str {
        self.label_or("alertname", "Unknown Alert")
    }

    /// The `instance` label, or `"N/A"`.
    pub fn instance(&self) -> &str {
        self.label_or("instance", "N/A")
    }

    /// The `job` label, or `"N/A"`.
    pub fn job(&self) -> &str {
        self.label_or("job", "N/A")
    }

    /// The `summary` annotation, or `"No summary"`.
    pub fn summary(&self) -> &str {
        self.annotations.get("summary").map(String::as_str).unwrap_or("No summary")
    }

    /// The `description` annotation, or `"No description"`.
    pub fn description(&self) -> &str {
        self.annotations.get("description").map(String::as_str).unwrap_or("No description")
    }

    fn label_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.labels.get(key).map(String::as_str).unwrap_or(default)
    }
}

/// One inbound webhook delivery.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationBatch {
    /// Webhook payload version (Alertmanager sends `"4"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Opaque key identifying the alert group. Passed through untouched.
    #[serde(default, deserialize_with = "null_as_default")]
    pub group_key: String,

    /// Overall status of the batch.
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: AlertStatus,

    /// Name of the Alertmanager receiver that produced the batch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver: Option<String>,

    /// The alerts in the batch, in the order they were sent.
    #[serde(default, deserialize_with = "null_as_default")]
    pub alerts: Vec<Alert>,
}

impl NotificationBatch {
    /// Parses a batch from a raw JSON request body. The body must be a JSON
    /// object.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_slice(body)?;
        if !value.is_object() {
            return Err(serde_json::Error::custom("expected a notification batch object"));
        }
        serde_json::from_value(value)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn deserialize_string_map<'de, D>(deserializer: D) -> Result<HashMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<HashMap<String, Option<String>>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(key, value)| value.map(|value| (key, value)))
        .collect())
}
