//! Simulated network latency.
//!
//! The forum has no backend; user-triggered actions still pause briefly so
//! the presentation layer can show a pending state. The pause is an explicit
//! value so that tests can run with no delay at all.

use std::time::Duration;

/// A fixed delay applied before an action resolves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimulatedLatency(Duration);

impl SimulatedLatency {
    /// No delay.
    pub const NONE: Self = Self(Duration::ZERO);

    /// Create a delay from milliseconds.
    #[must_use]
    pub const fn from_millis(millis: u64) -> Self {
        Self(Duration::from_millis(millis))
    }

    /// The configured duration.
    #[must_use]
    pub const fn duration(self) -> Duration {
        self.0
    }

    /// Whether this delay is disabled.
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0.is_zero()
    }

    /// Wait for the configured duration. Returns immediately when disabled.
    pub async fn wait(self) {
        if self.is_none() {
            return;
        }
        tokio::time::sleep(self.0).await;
    }
}

impl From<Duration> for SimulatedLatency {
    fn from(duration: Duration) -> Self {
        Self(duration)
    }
}
