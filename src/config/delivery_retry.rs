use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{deserialize_duration_from_ms, env_or, serialize_duration_to_ms};

/// --- Default values for retry configuration settings ---
fn default_max_retries() -> u32 {
    env_or("MAX_RETRIES", 3)
}

fn default_base_for_backoff() -> u32 {
    2
}

fn default_initial_backoff() -> Duration {
    Duration::from_secs(1)
}

/// Retry policy for message delivery.
///
/// The wait before retry `n` (0-based) is `initial_backoff * base_for_backoff^n`,
/// with no jitter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct DeliveryRetryConfig {
    /// Total number of attempts per message, including the first one.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Base for the exponential backoff calculation.
    #[serde(default = "default_base_for_backoff")]
    pub base_for_backoff: u32,
    /// Wait before the first retry.
    #[serde(
        default = "default_initial_backoff",
        deserialize_with = "deserialize_duration_from_ms",
        serialize_with = "serialize_duration_to_ms"
    )]
    pub initial_backoff_ms: Duration,
}

impl DeliveryRetryConfig {
    /// Number of attempts a message gets. A configured value of 0 still allows one.
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.max(1)
    }

    /// How long to wait after the failed attempt with the given 0-based index.
    pub fn backoff(&self, attempt_index: u32) -> Duration {
        self.initial_backoff_ms.saturating_mul(self.base_for_backoff.saturating_pow(attempt_index))
    }
}

impl Default for DeliveryRetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            base_for_backoff: default_base_for_backoff(),
            initial_backoff_ms: default_initial_backoff(),
        }
    }
}
