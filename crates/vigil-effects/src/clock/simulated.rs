//! Simulated clock handler for testing.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use std::sync::Arc;
use vigil_core::effects::ClockEffects;

/// Settable, advanceable clock for tests and simulation.
///
/// Clones share the same underlying instant, so a test can hand one clone
/// to the controller and keep another to advance time.
#[derive(Debug, Clone)]
pub struct SimulatedClock {
    current: Arc<Mutex<DateTime<Utc>>>,
}

impl SimulatedClock {
    /// Create a simulated clock starting at the given instant
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            current: Arc::new(Mutex::new(start)),
        }
    }

    /// Create a simulated clock starting at the Unix epoch
    pub fn at_epoch() -> Self {
        Self::new(DateTime::UNIX_EPOCH)
    }

    /// Advance simulated time by the given duration
    pub fn advance(&self, by: Duration) {
        let mut current = self.current.lock();
        *current += by;
    }

    /// Set the absolute simulated time
    pub fn set(&self, to: DateTime<Utc>) {
        *self.current.lock() = to;
    }

    /// Read the current simulated time without going through the trait
    pub fn current(&self) -> DateTime<Utc> {
        *self.current.lock()
    }
}

impl Default for SimulatedClock {
    fn default() -> Self {
        Self::at_epoch()
    }
}

#[async_trait]
impl ClockEffects for SimulatedClock {
    async fn now(&self) -> DateTime<Utc> {
        *self.current.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn advance_moves_all_clones() {
        let clock = SimulatedClock::new("2024-01-01T00:00:00Z".parse().unwrap());
        let shared = clock.clone();

        clock.advance(Duration::hours(5));
        assert_eq!(shared.now().await, clock.current());
        assert_eq!(
            clock.current(),
            "2024-01-01T05:00:00Z".parse::<DateTime<Utc>>().unwrap()
        );
    }

    #[tokio::test]
    async fn set_overrides_previous_instant() {
        let clock = SimulatedClock::at_epoch();
        let target: DateTime<Utc> = "2024-06-15T12:00:00Z".parse().unwrap();
        clock.set(target);
        assert_eq!(clock.now().await, target);
    }
}
