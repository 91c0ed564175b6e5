//! Pure deadline arithmetic and risk classification.
//!
//! `classify` is the single source of truth for how much time a switch has
//! left and which risk bucket that puts it in. It is a pure function of the
//! last confirmation, the configured timeout, and the supplied `now`; it is
//! safe to call at any rate and never touches a real clock.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Discrete risk bucket derived from the remaining time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
    /// More than a day of slack remains
    Safe,
    /// Less than 24 hours remain before the deadline
    Warning,
    /// The deadline has passed
    Expired,
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Classification::Safe => "safe",
            Classification::Warning => "warning",
            Classification::Expired => "expired",
        };
        f.write_str(label)
    }
}

/// Result of a single deadline evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeadlineStatus {
    /// The instant the switch trips absent a new confirmation
    pub deadline: DateTime<Utc>,
    /// Time left until the deadline, clamped to zero
    pub remaining: Duration,
    /// Risk bucket for `remaining`
    pub classification: Classification,
}

/// Evaluate the deadline for a confirmation made at `last_confirmation`
/// under the given `timeout`, as observed at `now`.
///
/// `deadline = last_confirmation + timeout`; `remaining` is clamped so it
/// never goes negative. Classification uses the raw remaining duration:
/// `Expired` once the deadline is reached, `Warning` while strictly less
/// than 24 hours remain, `Safe` otherwise. The day/hour/minute breakdown in
/// [`crate::state::RemainingTime`] is display-only and deliberately plays
/// no part here, so the two can never disagree at unit boundaries.
pub fn classify(
    last_confirmation: DateTime<Utc>,
    timeout: Duration,
    now: DateTime<Utc>,
) -> DeadlineStatus {
    let deadline = last_confirmation + timeout;

    if deadline <= now {
        return DeadlineStatus {
            deadline,
            remaining: Duration::zero(),
            classification: Classification::Expired,
        };
    }

    let remaining = deadline - now;
    let classification = if remaining < Duration::hours(24) {
        Classification::Warning
    } else {
        Classification::Safe
    };

    DeadlineStatus {
        deadline,
        remaining,
        classification,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn at(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn ninety_day_scenario() {
        let last = at("2024-01-01T00:00:00Z");
        let timeout = Duration::days(90);

        let fresh = classify(last, timeout, last);
        assert_eq!(fresh.remaining, Duration::days(90));
        assert_eq!(fresh.classification, Classification::Safe);
        assert_eq!(fresh.deadline, last + Duration::days(90));

        let near = classify(last, timeout, fresh.deadline - Duration::seconds(1));
        assert_eq!(near.classification, Classification::Warning);
        assert_eq!(near.remaining, Duration::seconds(1));

        let past = classify(last, timeout, fresh.deadline + Duration::seconds(1));
        assert_eq!(past.classification, Classification::Expired);
        assert_eq!(past.remaining, Duration::zero());
    }

    #[test]
    fn warning_window_boundaries() {
        let last = at("2024-01-01T00:00:00Z");
        let timeout = Duration::days(30);
        let deadline = last + timeout;

        let just_inside = classify(last, timeout, deadline - Duration::seconds(24 * 3600 - 1));
        assert_eq!(just_inside.classification, Classification::Warning);

        let just_outside = classify(last, timeout, deadline - Duration::seconds(24 * 3600 + 1));
        assert_eq!(just_outside.classification, Classification::Safe);

        // exactly 24h out is not yet "less than a day"
        let on_the_line = classify(last, timeout, deadline - Duration::hours(24));
        assert_eq!(on_the_line.classification, Classification::Safe);
    }

    #[test]
    fn deadline_instant_itself_is_expired() {
        let last = at("2024-01-01T00:00:00Z");
        let timeout = Duration::days(7);
        let status = classify(last, timeout, last + timeout);
        assert_eq!(status.classification, Classification::Expired);
        assert_eq!(status.remaining, Duration::zero());
    }

    proptest! {
        /// Before the deadline there is always time left and the state is
        /// never Expired; at or past the deadline remaining is exactly zero.
        #[test]
        fn classification_partitions_the_timeline(
            timeout_days in 1i64..=365,
            offset_secs in 0i64..=400 * 86_400,
        ) {
            let last = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
            let timeout = Duration::days(timeout_days);
            let now = last + Duration::seconds(offset_secs);
            let status = classify(last, timeout, now);

            if offset_secs < timeout_days * 86_400 {
                prop_assert!(status.remaining > Duration::zero());
                prop_assert_ne!(status.classification, Classification::Expired);
            } else {
                prop_assert_eq!(status.remaining, Duration::zero());
                prop_assert_eq!(status.classification, Classification::Expired);
            }
        }

        /// Repeated evaluation with unchanged inputs drifts nowhere.
        #[test]
        fn classify_is_idempotent(
            timeout_days in 1i64..=365,
            offset_secs in 0i64..=400 * 86_400,
        ) {
            let last = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
            let now = last + Duration::seconds(offset_secs);
            let a = classify(last, Duration::days(timeout_days), now);
            let b = classify(last, Duration::days(timeout_days), now);
            prop_assert_eq!(a, b);
        }
    }
}
