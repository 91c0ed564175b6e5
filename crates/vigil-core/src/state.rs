//! Derived switch state.
//!
//! `SwitchState` is never stored; the controller recomputes it on demand
//! from the last confirmation and the live configuration. The day/hour/
//! minute breakdown exists purely for countdown rendering and never feeds
//! back into classification.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::deadline::{classify, Classification, DeadlineStatus};

/// A remaining duration broken into whole days, hours, and minutes.
///
/// Floor division throughout: hours stay in `0..24`, minutes in `0..60`,
/// seconds are truncated rather than rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemainingTime {
    /// Whole days remaining
    pub days: i64,
    /// Whole hours remaining past the day count (0-23)
    pub hours: i64,
    /// Whole minutes remaining past the hour count (0-59)
    pub minutes: i64,
}

impl RemainingTime {
    /// Decompose a non-negative duration into display units
    pub fn from_duration(remaining: Duration) -> Self {
        let secs = remaining.num_seconds().max(0);
        Self {
            days: secs / 86_400,
            hours: (secs % 86_400) / 3_600,
            minutes: (secs % 3_600) / 60,
        }
    }
}

impl std::fmt::Display for RemainingTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}d {}h {}m", self.days, self.hours, self.minutes)
    }
}

/// Snapshot of the switch as observed at a single instant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitchState {
    /// Instant of the most recent successful check-in
    pub last_confirmation: DateTime<Utc>,
    /// Instant the switch trips absent a new confirmation
    pub deadline: DateTime<Utc>,
    /// Seconds left until the deadline, clamped to zero
    pub remaining_secs: u64,
    /// Risk bucket for the remaining time
    pub classification: Classification,
}

impl SwitchState {
    /// Derive the state for `last_confirmation` under `timeout` at `now`
    pub fn derive(
        last_confirmation: DateTime<Utc>,
        timeout: Duration,
        now: DateTime<Utc>,
    ) -> Self {
        let DeadlineStatus {
            deadline,
            remaining,
            classification,
        } = classify(last_confirmation, timeout, now);
        Self {
            last_confirmation,
            deadline,
            remaining_secs: remaining.num_seconds().max(0) as u64,
            classification,
        }
    }

    /// Remaining time as a duration
    pub fn remaining(&self) -> Duration {
        Duration::seconds(self.remaining_secs as i64)
    }

    /// Remaining time broken into display units
    pub fn breakdown(&self) -> RemainingTime {
        RemainingTime::from_duration(self.remaining())
    }

    /// Countdown string for display: `"12d 4h 52m"`, or `"Deadline Passed"`
    /// once the switch has expired
    pub fn countdown_label(&self) -> String {
        if self.classification == Classification::Expired {
            "Deadline Passed".to_string()
        } else {
            self.breakdown().to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn breakdown_uses_floor_division() {
        // 2 days, 3 hours, 4 minutes, 59 seconds: seconds truncate away
        let remaining = Duration::seconds(2 * 86_400 + 3 * 3_600 + 4 * 60 + 59);
        let broken = RemainingTime::from_duration(remaining);
        assert_eq!(
            broken,
            RemainingTime {
                days: 2,
                hours: 3,
                minutes: 4
            }
        );
        assert_eq!(broken.to_string(), "2d 3h 4m");
    }

    #[test]
    fn breakdown_units_stay_in_range() {
        // 23:59:59 never rolls over into a day
        let broken = RemainingTime::from_duration(Duration::seconds(86_399));
        assert_eq!(
            broken,
            RemainingTime {
                days: 0,
                hours: 23,
                minutes: 59
            }
        );
    }

    #[test]
    fn derive_matches_classify() {
        let last = at("2024-01-01T00:00:00Z");
        let state = SwitchState::derive(last, Duration::days(90), last);
        assert_eq!(state.classification, Classification::Safe);
        assert_eq!(state.breakdown().to_string(), "90d 0h 0m");
        assert_eq!(state.countdown_label(), "90d 0h 0m");
        assert_eq!(state.deadline, last + Duration::days(90));
    }

    #[test]
    fn expired_state_reads_deadline_passed() {
        let last = at("2024-01-01T00:00:00Z");
        let state = SwitchState::derive(last, Duration::days(1), last + Duration::days(2));
        assert_eq!(state.countdown_label(), "Deadline Passed");
        assert_eq!(state.remaining_secs, 0);
    }
}
