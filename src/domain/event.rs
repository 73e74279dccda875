//! Carrier records accepted at the aggregation boundary.

use chrono::{DateTime, NaiveDate, Utc};

/// A single timestamped occurrence fetched from the store.
///
/// The upstream feed validates rows on write but may still hand back
/// gaps; a record with no timestamp is skipped by every tally rather
/// than treated as an error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventRecord {
    /// When the event occurred, if known.
    pub occurred_at: Option<DateTime<Utc>>,
    /// Numeric score attached to the event, when the feed carries one.
    pub score: Option<f64>,
}

impl EventRecord {
    /// Record with a timestamp and no score.
    #[must_use]
    pub const fn at(occurred_at: DateTime<Utc>) -> Self {
        Self {
            occurred_at: Some(occurred_at),
            score: None,
        }
    }

    /// Record with a timestamp and an optional score.
    #[must_use]
    pub const fn scored(occurred_at: DateTime<Utc>, score: Option<f64>) -> Self {
        Self {
            occurred_at: Some(occurred_at),
            score,
        }
    }

    /// UTC calendar day the event falls on, if it has a timestamp.
    #[must_use]
    pub fn day(&self) -> Option<NaiveDate> {
        self.occurred_at.map(|ts| ts.date_naive())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn day_truncates_to_the_utc_date() {
        let Some(ts) = DateTime::parse_from_rfc3339("2024-01-05T23:59:59Z")
            .ok()
            .map(|t| t.with_timezone(&Utc))
        else {
            panic!("valid timestamp");
        };
        let record = EventRecord::at(ts);
        assert_eq!(record.day(), NaiveDate::from_ymd_opt(2024, 1, 5));
    }

    #[test]
    fn missing_timestamp_has_no_day() {
        let record = EventRecord {
            occurred_at: None,
            score: Some(4.5),
        };
        assert_eq!(record.day(), None);
    }
}
