//! Bounded check-in history.
//!
//! The log keeps the most recent confirmations, newest first, and silently
//! drops the oldest entries once the capacity is reached. `record` returns a
//! new log value rather than mutating in place, which keeps rollback on a
//! failed settlement acknowledgement trivial (the caller just keeps the old
//! value).

use chrono::{DateTime, Datelike, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Default number of check-ins retained
pub const DEFAULT_LOG_CAPACITY: usize = 10;

/// A single "I am alive" confirmation, immutable once created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmationEvent {
    /// When the confirmation was made
    pub at: DateTime<Utc>,
}

impl ConfirmationEvent {
    /// Human label for a history row, relative to `now`.
    ///
    /// Precedence: same calendar day as `now` renders the clock time
    /// (`HH:MM`, zero-padded); the immediately preceding calendar day
    /// renders the literal `Yesterday`; anything older renders an
    /// abbreviated month and day number (`Mar 5`). Comparison is calendar
    /// date equality in `now`'s timezone, not a rolling 24-hour window.
    pub fn display_label<Tz>(&self, now: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let local = self.at.with_timezone(&now.timezone());
        let event_day = local.date_naive();
        let today = now.date_naive();

        if event_day == today {
            local.format("%H:%M").to_string()
        } else if today.pred_opt() == Some(event_day) {
            "Yesterday".to_string()
        } else {
            format!("{} {}", local.format("%b"), local.day())
        }
    }
}

/// Newest-first, capacity-bounded sequence of confirmations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmationLog {
    events: Vec<ConfirmationEvent>,
    capacity: usize,
}

impl ConfirmationLog {
    /// Empty log with the default capacity of 10
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_LOG_CAPACITY)
    }

    /// Empty log retaining at most `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: Vec::new(),
            capacity,
        }
    }

    /// Prepend `event` and truncate to capacity, returning the new log
    #[must_use]
    pub fn record(&self, event: ConfirmationEvent) -> Self {
        let mut events = Vec::with_capacity(self.events.len() + 1);
        events.push(event);
        events.extend(self.events.iter().copied());
        events.truncate(self.capacity);
        Self {
            events,
            capacity: self.capacity,
        }
    }

    /// Entries, newest first
    pub fn iter(&self) -> impl Iterator<Item = &ConfirmationEvent> {
        self.events.iter()
    }

    /// Number of retained entries
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether no check-in has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Maximum number of retained entries
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Most recent confirmation, if any
    pub fn latest(&self) -> Option<&ConfirmationEvent> {
        self.events.first()
    }
}

impl Default for ConfirmationLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use proptest::prelude::*;

    fn at(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    fn event(s: &str) -> ConfirmationEvent {
        ConfirmationEvent { at: at(s) }
    }

    #[test]
    fn record_prepends_newest_first() {
        let log = ConfirmationLog::new()
            .record(event("2024-03-01T08:00:00Z"))
            .record(event("2024-03-02T08:00:00Z"))
            .record(event("2024-03-03T08:00:00Z"));

        let instants: Vec<_> = log.iter().map(|e| e.at).collect();
        assert_eq!(
            instants,
            vec![
                at("2024-03-03T08:00:00Z"),
                at("2024-03-02T08:00:00Z"),
                at("2024-03-01T08:00:00Z"),
            ]
        );
        assert_eq!(log.latest().map(|e| e.at), Some(at("2024-03-03T08:00:00Z")));
    }

    #[test]
    fn overflow_drops_the_oldest() {
        let base = at("2024-01-01T00:00:00Z");
        let mut log = ConfirmationLog::with_capacity(3);
        for i in 0..5 {
            log = log.record(ConfirmationEvent {
                at: base + Duration::hours(i),
            });
        }
        assert_eq!(log.len(), 3);
        // the two earliest entries are gone
        let instants: Vec<_> = log.iter().map(|e| e.at).collect();
        assert_eq!(
            instants,
            vec![
                base + Duration::hours(4),
                base + Duration::hours(3),
                base + Duration::hours(2),
            ]
        );
    }

    #[test]
    fn record_does_not_mutate_the_source_log() {
        let original = ConfirmationLog::new().record(event("2024-03-01T08:00:00Z"));
        let _grown = original.record(event("2024-03-02T08:00:00Z"));
        assert_eq!(original.len(), 1);
    }

    #[test]
    fn same_day_label_is_clock_time() {
        let now = at("2024-03-05T18:30:00Z");
        let e = event("2024-03-05T09:07:00Z");
        assert_eq!(e.display_label(&now), "09:07");
    }

    #[test]
    fn previous_day_label_is_yesterday() {
        let now = at("2024-03-05T00:10:00Z");
        // late the previous evening: well inside 24h, still "Yesterday"
        let e = event("2024-03-04T23:55:00Z");
        assert_eq!(e.display_label(&now), "Yesterday");
    }

    #[test]
    fn older_label_is_month_and_day() {
        let now = at("2024-03-05T12:00:00Z");
        assert_eq!(event("2024-02-28T12:00:00Z").display_label(&now), "Feb 28");
        assert_eq!(event("2023-12-09T12:00:00Z").display_label(&now), "Dec 9");
    }

    #[test]
    fn calendar_day_comparison_is_not_a_rolling_window() {
        let now = at("2024-03-05T01:00:00Z");
        // two hours ago but across midnight: yesterday, not a clock time
        let e = event("2024-03-04T23:00:00Z");
        assert_eq!(e.display_label(&now), "Yesterday");
    }

    #[test]
    fn month_boundary_yesterday() {
        let now = at("2024-03-01T09:00:00Z");
        let e = event("2024-02-29T20:00:00Z");
        assert_eq!(e.display_label(&now), "Yesterday");
    }

    proptest! {
        /// k records into an empty log of capacity c leave min(k, c)
        /// entries, newest first.
        #[test]
        fn length_is_min_of_records_and_capacity(
            k in 0usize..40,
            c in 1usize..20,
        ) {
            let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
            let mut log = ConfirmationLog::with_capacity(c);
            for i in 0..k {
                log = log.record(ConfirmationEvent {
                    at: base + Duration::minutes(i as i64),
                });
            }
            prop_assert_eq!(log.len(), k.min(c));
            let instants: Vec<_> = log.iter().map(|e| e.at).collect();
            let mut sorted = instants.clone();
            sorted.sort_by(|a, b| b.cmp(a));
            prop_assert_eq!(instants, sorted);
        }
    }
}
