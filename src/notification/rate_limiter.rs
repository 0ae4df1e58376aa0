//! Sliding-window admission control for outbound messages.

use std::{collections::VecDeque, time::Duration};

use dashmap::DashMap;
use tokio::time::Instant;

/// Length of the trailing window the ceiling applies to.
pub const RATE_LIMIT_WINDOW: Duration = Duration::from_secs(60);

/// A fixed-ceiling sliding-window counter keyed by destination.
///
/// At most `ceiling` admissions are granted to a destination within any
/// trailing window. Each destination's window is updated under its map entry
/// lock, so concurrent callers observe a single order of admit/reject
/// decisions.
#[derive(Debug)]
pub struct RateLimiter {
    ceiling: usize,
    window: Duration,
    windows: DashMap<String, VecDeque<Instant>>,
}

impl RateLimiter {
    /// Creates a limiter admitting `per_minute` messages per destination per minute.
    pub fn new(per_minute: u32) -> Self {
        Self::with_window(per_minute, RATE_LIMIT_WINDOW)
    }

    /// Creates a limiter with a custom window length.
    pub fn with_window(ceiling: u32, window: Duration) -> Self {
        Self { ceiling: ceiling as usize, window, windows: DashMap::new() }
    }

    /// Admits or rejects a message for `destination` at time `now`.
    ///
    /// Timestamps older than the window are dropped first. A rejected attempt
    /// is not recorded.
    pub fn try_admit(&self, destination: &str, now: Instant) -> bool {
        let mut timestamps = self.windows.entry(destination.to_string()).or_default();

        timestamps.retain(|admitted| now.saturating_duration_since(*admitted) < self.window);

        if timestamps.len() >= self.ceiling {
            return false;
        }

        timestamps.push_back(now);
        true
    }

    /// The configured ceiling.
    pub fn ceiling(&self) -> usize {
        self.ceiling
    }
}
