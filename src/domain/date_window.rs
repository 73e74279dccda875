//! UTC date windows for metrics queries.
//!
//! [`DateWindow`] converts a requested day count into a concrete range of
//! UTC calendar days. The count is clamped to [`MIN_DAYS`]`..=`[`MAX_DAYS`]
//! and defaults to [`DEFAULT_DAYS`] when the request carries no parsable
//! value; the window always ends on the reference day and spans exactly
//! that many days. The reference day is an explicit parameter so the wall
//! clock stays out of the computation.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

/// Day count used when the request carries no parsable value.
pub const DEFAULT_DAYS: u32 = 90;

/// Smallest accepted window, in days.
pub const MIN_DAYS: u32 = 7;

/// Largest accepted window, in days.
pub const MAX_DAYS: u32 = 365;

/// An inclusive range of UTC calendar days.
///
/// Construction cannot fail: out-of-range day counts are clamped, never
/// rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateWindow {
    /// Builds a window of `days` calendar days ending today (UTC).
    ///
    /// `days` is clamped to `MIN_DAYS..=MAX_DAYS` before use.
    #[must_use]
    pub fn ending_today(days: u32) -> Self {
        Self::ending_at(Utc::now().date_naive(), days)
    }

    /// Builds a window of `days` calendar days ending on `today`.
    #[must_use]
    pub fn ending_at(today: NaiveDate, days: u32) -> Self {
        let days = days.clamp(MIN_DAYS, MAX_DAYS);
        let start = today - Duration::days(i64::from(days) - 1);
        Self { start, end: today }
    }

    /// Parses a raw `days` query value and builds the window ending on
    /// `today`. Absent or non-integer values fall back to
    /// [`DEFAULT_DAYS`]; integers are clamped.
    #[must_use]
    pub fn from_query(raw: Option<&str>, today: NaiveDate) -> Self {
        Self::ending_at(today, parse_days(raw))
    }

    /// First day of the window (inclusive).
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the window (inclusive).
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Day after the last window day, for half-open range queries.
    #[must_use]
    pub fn end_exclusive(&self) -> NaiveDate {
        self.end + Duration::days(1)
    }

    /// Start of the window as a UTC instant (midnight of the first day).
    #[must_use]
    pub fn start_utc(&self) -> DateTime<Utc> {
        self.start.and_time(NaiveTime::MIN).and_utc()
    }

    /// Exclusive end of the window as a UTC instant.
    #[must_use]
    pub fn end_exclusive_utc(&self) -> DateTime<Utc> {
        self.end_exclusive().and_time(NaiveTime::MIN).and_utc()
    }

    /// Number of calendar days in the window.
    #[must_use]
    pub fn num_days(&self) -> u32 {
        let span = (self.end - self.start).num_days().max(0);
        u32::try_from(span).unwrap_or(u32::MAX).saturating_add(1)
    }

    /// Iterates the window days in ascending order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        self.start.iter_days().take(self.num_days() as usize)
    }

    /// Whether `date` falls inside the window.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Parses a raw day-count value, clamping integers and falling back to
/// [`DEFAULT_DAYS`] for anything unparsable.
fn parse_days(raw: Option<&str>) -> u32 {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .map_or(DEFAULT_DAYS, |n| {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let clamped = n.clamp(i64::from(MIN_DAYS), i64::from(MAX_DAYS)) as u32;
            clamped
        })
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        let Some(date) = NaiveDate::from_ymd_opt(y, m, d) else {
            panic!("valid date");
        };
        date
    }

    #[test]
    fn window_spans_exactly_the_requested_days() {
        let today = date(2024, 6, 15);
        for days in [7_u32, 30, 90, 365] {
            let window = DateWindow::ending_at(today, days);
            assert_eq!(window.num_days(), days);
            assert_eq!(window.end(), today);
            assert_eq!(window.days().count() as u32, days);
        }
    }

    #[test]
    fn window_days_are_consecutive_and_ascending() {
        let window = DateWindow::ending_at(date(2024, 3, 1), 30);
        let days: Vec<NaiveDate> = window.days().collect();
        assert_eq!(days.len(), 30);
        assert_eq!(days.last().copied(), Some(date(2024, 3, 1)));
        for pair in days.windows(2) {
            let [a, b] = pair else {
                panic!("window of 2");
            };
            assert_eq!(*b - *a, Duration::days(1));
        }
    }

    #[test]
    fn day_count_is_clamped() {
        let today = date(2024, 1, 1);
        assert_eq!(DateWindow::ending_at(today, 1).num_days(), MIN_DAYS);
        assert_eq!(DateWindow::ending_at(today, 1000).num_days(), MAX_DAYS);
    }

    #[test]
    fn query_parsing_defaults_and_clamps() {
        let today = date(2024, 1, 1);
        assert_eq!(DateWindow::from_query(None, today).num_days(), DEFAULT_DAYS);
        assert_eq!(
            DateWindow::from_query(Some("abc"), today).num_days(),
            DEFAULT_DAYS
        );
        assert_eq!(
            DateWindow::from_query(Some("5.9"), today).num_days(),
            DEFAULT_DAYS
        );
        assert_eq!(DateWindow::from_query(Some("30"), today).num_days(), 30);
        assert_eq!(
            DateWindow::from_query(Some("2"), today).num_days(),
            MIN_DAYS
        );
        assert_eq!(
            DateWindow::from_query(Some("-14"), today).num_days(),
            MIN_DAYS
        );
        assert_eq!(
            DateWindow::from_query(Some("9999"), today).num_days(),
            MAX_DAYS
        );
        assert_eq!(
            DateWindow::from_query(Some(" 14 "), today).num_days(),
            14
        );
    }

    #[test]
    fn exclusive_end_is_one_day_past_the_last() {
        let window = DateWindow::ending_at(date(2024, 2, 28), 7);
        assert_eq!(window.end_exclusive(), date(2024, 2, 29));
        assert_eq!(
            window.end_exclusive_utc() - window.start_utc(),
            Duration::days(7)
        );
    }

    #[test]
    fn contains_covers_both_bounds() {
        let window = DateWindow::ending_at(date(2024, 1, 10), 7);
        assert!(window.contains(date(2024, 1, 4)));
        assert!(window.contains(date(2024, 1, 10)));
        assert!(!window.contains(date(2024, 1, 3)));
        assert!(!window.contains(date(2024, 1, 11)));
    }
}
