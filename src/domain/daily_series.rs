//! Dense daily series over a date window.
//!
//! Tallies accumulate raw event records into per-day counts; the dense
//! expansion functions then emit exactly one entry per window day, in
//! ascending date order, zero-filled where no events fell. That density
//! guarantee is the defining contract of this module: a window of N days
//! always produces a series of N entries regardless of how sparse the
//! input is, and events outside the window never appear.

use std::collections::HashMap;

use chrono::NaiveDate;

use super::date_window::DateWindow;
use super::event::EventRecord;
use super::rolling::{rolling_mean, round2};

/// Width of the trailing average window on the school series.
pub const ROLLING_DAYS: usize = 7;

/// Per-day event counts keyed by UTC calendar day.
#[derive(Debug, Clone, Default)]
pub struct DailyTally {
    counts: HashMap<NaiveDate, u64>,
}

impl DailyTally {
    /// Tallies one count per event that carries a timestamp; records
    /// without one are skipped.
    #[must_use]
    pub fn collect<'a, I>(events: I) -> Self
    where
        I: IntoIterator<Item = &'a EventRecord>,
    {
        let mut counts: HashMap<NaiveDate, u64> = HashMap::new();
        for day in events.into_iter().filter_map(EventRecord::day) {
            *counts.entry(day).or_insert(0) += 1;
        }
        Self { counts }
    }

    /// Count recorded on `date`; zero when the day saw no events.
    #[must_use]
    pub fn count_on(&self, date: NaiveDate) -> u64 {
        self.counts.get(&date).copied().unwrap_or(0)
    }
}

/// Per-day score sums and sample counts.
#[derive(Debug, Clone, Default)]
pub struct ScoreTally {
    sums: HashMap<NaiveDate, (f64, u32)>,
}

impl ScoreTally {
    /// Accumulates scores per day; records missing either a timestamp
    /// or a score contribute nothing.
    #[must_use]
    pub fn collect<'a, I>(events: I) -> Self
    where
        I: IntoIterator<Item = &'a EventRecord>,
    {
        let mut sums: HashMap<NaiveDate, (f64, u32)> = HashMap::new();
        for event in events {
            let (Some(day), Some(score)) = (event.day(), event.score) else {
                continue;
            };
            let entry = sums.entry(day).or_insert((0.0, 0));
            entry.0 += score;
            entry.1 += 1;
        }
        Self { sums }
    }

    /// Mean score on `date`, rounded to two decimals; `None` when the
    /// day has no scored events.
    #[must_use]
    pub fn mean_on(&self, date: NaiveDate) -> Option<f64> {
        self.sums
            .get(&date)
            .map(|&(sum, n)| round2(sum / f64::from(n)))
    }
}

/// One day of a dense single-category series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyCount {
    /// UTC calendar day.
    pub date: NaiveDate,
    /// Events recorded on that day.
    pub count: u64,
}

/// Expands a tally into a dense series over `window`.
#[must_use]
pub fn dense_counts(window: DateWindow, tally: &DailyTally) -> Vec<DailyCount> {
    window
        .days()
        .map(|date| DailyCount {
            date,
            count: tally.count_on(date),
        })
        .collect()
}

/// One day of the admin dashboard series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardDay {
    /// UTC calendar day.
    pub date: NaiveDate,
    /// Reviews created on that day.
    pub reviews: u64,
    /// Accounts created on that day.
    pub users: u64,
}

/// Joins review and account tallies into one dense dashboard series.
#[must_use]
pub fn dashboard_days(
    window: DateWindow,
    reviews: &DailyTally,
    users: &DailyTally,
) -> Vec<DashboardDay> {
    window
        .days()
        .map(|date| DashboardDay {
            date,
            reviews: reviews.count_on(date),
            users: users.count_on(date),
        })
        .collect()
}

/// One day of a school's review series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SchoolDay {
    /// UTC calendar day.
    pub date: NaiveDate,
    /// Reviews created on that day.
    pub review_count: u64,
    /// Mean review score on that day, when any review carried a score.
    pub avg_score: Option<f64>,
    /// Trailing [`ROLLING_DAYS`]-day mean of `review_count`.
    pub reviews_7d: f64,
}

/// Builds a school's dense daily series with the trailing average column.
#[must_use]
pub fn school_days(
    window: DateWindow,
    reviews: &DailyTally,
    scores: &ScoreTally,
) -> Vec<SchoolDay> {
    let dense = dense_counts(window, reviews);
    #[allow(clippy::cast_precision_loss)]
    let counts: Vec<f64> = dense.iter().map(|day| day.count as f64).collect();
    let smoothed = rolling_mean(&counts, ROLLING_DAYS);
    dense
        .into_iter()
        .zip(smoothed)
        .map(|(day, reviews_7d)| SchoolDay {
            date: day.date,
            review_count: day.count,
            avg_score: scores.mean_on(day.date),
            reviews_7d,
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        let Some(date) = NaiveDate::from_ymd_opt(y, m, d) else {
            panic!("valid date");
        };
        date
    }

    fn ts(s: &str) -> DateTime<Utc> {
        let Ok(parsed) = DateTime::parse_from_rfc3339(s) else {
            panic!("valid timestamp");
        };
        parsed.with_timezone(&Utc)
    }

    #[test]
    fn empty_input_yields_all_zero_series() {
        let window = DateWindow::ending_at(date(2024, 1, 31), 31);
        let series = dense_counts(window, &DailyTally::default());
        assert_eq!(series.len(), 31);
        assert!(series.iter().all(|day| day.count == 0));
    }

    #[test]
    fn same_day_events_accumulate_and_out_of_window_events_vanish() {
        let events = [
            EventRecord::at(ts("2024-01-03T08:00:00Z")),
            EventRecord::at(ts("2024-01-03T17:30:00Z")),
            // Before the window; must not leak into the first bucket.
            EventRecord::at(ts("2023-12-20T12:00:00Z")),
            // After the window; must not leak into the last bucket.
            EventRecord::at(ts("2024-02-01T00:00:00Z")),
        ];
        let window = DateWindow::ending_at(date(2024, 1, 7), 7);
        let series = dense_counts(window, &DailyTally::collect(&events));

        assert_eq!(series.len(), 7);
        assert_eq!(
            series.iter().map(|d| d.count).sum::<u64>(),
            2,
            "only the in-window events count"
        );
        let Some(third) = series.get(2) else {
            panic!("series has 7 entries");
        };
        assert_eq!(third.date, date(2024, 1, 3));
        assert_eq!(third.count, 2);
    }

    #[test]
    fn three_day_window_end_to_end() {
        let events = [
            EventRecord::at(ts("2024-01-01T09:00:00Z")),
            EventRecord::at(ts("2024-01-01T10:00:00Z")),
            EventRecord::at(ts("2024-01-03T11:00:00Z")),
        ];
        // A 3-day request is clamped up to the 7-day minimum, so the
        // window covers 2023-12-28..=2024-01-03 and the asserted days
        // sit at the tail.
        let window = DateWindow::ending_at(date(2024, 1, 3), 7);
        let series = dense_counts(window, &DailyTally::collect(&events));
        let tail: Vec<(NaiveDate, u64)> = series
            .iter()
            .skip(4)
            .map(|d| (d.date, d.count))
            .collect();
        assert_eq!(
            tail,
            vec![
                (date(2024, 1, 1), 2),
                (date(2024, 1, 2), 0),
                (date(2024, 1, 3), 1),
            ]
        );
    }

    #[test]
    fn events_without_timestamps_are_skipped() {
        let events = [
            EventRecord {
                occurred_at: None,
                score: None,
            },
            EventRecord::at(ts("2024-01-05T00:00:00Z")),
        ];
        let tally = DailyTally::collect(&events);
        assert_eq!(tally.count_on(date(2024, 1, 5)), 1);
    }

    #[test]
    fn dashboard_series_joins_both_tallies() {
        let reviews = [EventRecord::at(ts("2024-01-06T12:00:00Z"))];
        let users = [
            EventRecord::at(ts("2024-01-06T13:00:00Z")),
            EventRecord::at(ts("2024-01-07T09:00:00Z")),
        ];
        let window = DateWindow::ending_at(date(2024, 1, 7), 7);
        let series = dashboard_days(
            window,
            &DailyTally::collect(&reviews),
            &DailyTally::collect(&users),
        );

        assert_eq!(series.len(), 7);
        let Some(sixth) = series.get(5) else {
            panic!("series has 7 entries");
        };
        assert_eq!((sixth.reviews, sixth.users), (1, 1));
        let Some(last) = series.last() else {
            panic!("series has 7 entries");
        };
        assert_eq!((last.reviews, last.users), (0, 1));
    }

    #[test]
    fn school_series_carries_scores_and_rolling_average() {
        let events = [
            EventRecord::scored(ts("2024-01-01T10:00:00Z"), Some(4.0)),
            EventRecord::scored(ts("2024-01-01T11:00:00Z"), Some(3.0)),
            EventRecord::scored(ts("2024-01-04T10:00:00Z"), None),
        ];
        let window = DateWindow::ending_at(date(2024, 1, 7), 7);
        let reviews = DailyTally::collect(&events);
        let scores = ScoreTally::collect(&events);
        let series = school_days(window, &reviews, &scores);

        assert_eq!(series.len(), 7);
        let Some(first) = series.first() else {
            panic!("series has 7 entries");
        };
        assert_eq!(first.review_count, 2);
        assert_eq!(first.avg_score, Some(3.5));
        assert_eq!(first.reviews_7d, 2.0);

        // Day 4 has one unscored review: counted, but no average.
        let Some(fourth) = series.get(3) else {
            panic!("series has 7 entries");
        };
        assert_eq!(fourth.review_count, 1);
        assert_eq!(fourth.avg_score, None);
        // Trailing mean over days 1..=4: (2 + 0 + 0 + 1) / 4.
        assert_eq!(fourth.reviews_7d, 0.75);

        // Last day: trailing mean over the full 7 days, 3/7 rounded.
        let Some(last) = series.last() else {
            panic!("series has 7 entries");
        };
        assert_eq!(last.avg_score, None);
        assert_eq!(last.reviews_7d, 0.43);
    }
}
