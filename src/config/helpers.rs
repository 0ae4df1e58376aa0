use std::{fs, str::FromStr, time::Duration};

use serde::{Deserialize, Deserializer, Serializer};

/// Custom deserializer for Duration from milliseconds
pub fn deserialize_duration_from_ms<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let ms = u64::deserialize(deserializer)?;
    Ok(Duration::from_millis(ms))
}

/// Custom deserializer for Duration from seconds
pub fn deserialize_duration_from_seconds<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let secs = u64::deserialize(deserializer)?;
    Ok(Duration::from_secs(secs))
}

/// Custom serializer for Duration to milliseconds
pub fn serialize_duration_to_ms<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u64(duration.as_millis() as u64)
}

/// Custom serializer for Duration to seconds
pub fn serialize_duration_to_seconds<S>(
    duration: &Duration,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u64(duration.as_secs())
}

/// Reads a secret from the `var` environment variable, or from the file named
/// by the `file_var` environment variable (Docker secrets).
///
/// Values are trimmed; empty values count as unset.
pub fn secret_from_env(var: &str, file_var: &str) -> Option<String> {
    let from_var = std::env::var(var).ok().map(|v| v.trim().to_string());
    if let Some(value) = from_var.filter(|v| !v.is_empty()) {
        return Some(value);
    }

    let path = std::env::var(file_var).ok()?;
    match fs::read_to_string(&path) {
        Ok(contents) => Some(contents.trim().to_string()).filter(|v| !v.is_empty()),
        Err(e) => {
            tracing::error!(path = %path, error = %e, "Failed to read secret file.");
            None
        }
    }
}

/// Parses the `var` environment variable, falling back to `default` when it is
/// unset or unparseable.
pub fn env_or<T: FromStr>(var: &str, default: T) -> T {
    std::env::var(var).ok().and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}
