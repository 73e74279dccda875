//! Metrics service: fetches raw rows and runs the aggregation core.
//!
//! Independent fetches feeding one aggregation are issued concurrently
//! and joined before any bucketing starts; the aggregation itself never
//! suspends. Nothing is cached — every call builds its series from
//! freshly fetched rows and request-scoped tallies.

use chrono::Utc;
use uuid::Uuid;

use crate::domain::daily_series::{dashboard_days, school_days};
use crate::domain::section_average::section_averages;
use crate::domain::{
    DailyTally, DashboardDay, DateWindow, EventRecord, SchoolDay, ScoreTally, SectionAverage,
    SectionRating,
};
use crate::error::ApiError;
use crate::persistence::PostgresStore;
use crate::persistence::models::School;

/// Staff school metrics: the school, its dense daily series, and the
/// per-section rating averages over the window.
#[derive(Debug, Clone)]
pub struct SchoolMetrics {
    /// The staff member's school.
    pub school: School,
    /// Dense daily series with counts, mean scores, and the trailing
    /// 7-day average.
    pub daily_series: Vec<SchoolDay>,
    /// Per-section averages, sorted by section key.
    pub section_averages: Vec<SectionAverage>,
}

/// Read-side aggregation over the review store.
#[derive(Debug, Clone)]
pub struct MetricsService {
    store: PostgresStore,
}

impl MetricsService {
    /// Creates a new `MetricsService`.
    #[must_use]
    pub fn new(store: PostgresStore) -> Self {
        Self { store }
    }

    /// Admin dashboard: dense daily counts of new reviews and new
    /// accounts over the requested window.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Storage`] when a fetch fails.
    pub async fn dashboard(&self, days: Option<&str>) -> Result<Vec<DashboardDay>, ApiError> {
        let window = DateWindow::from_query(days, Utc::now().date_naive());

        let (reviews, profiles) = tokio::join!(
            self.store.review_created_in(window),
            self.store.profile_created_in(window),
        );

        let reviews: Vec<EventRecord> = reviews?
            .into_iter()
            .map(|ts| EventRecord {
                occurred_at: ts,
                score: None,
            })
            .collect();
        let profiles: Vec<EventRecord> = profiles?
            .into_iter()
            .map(|ts| EventRecord {
                occurred_at: ts,
                score: None,
            })
            .collect();

        Ok(dashboard_days(
            window,
            &DailyTally::collect(&reviews),
            &DailyTally::collect(&profiles),
        ))
    }

    /// Staff school metrics: daily review series plus section averages
    /// for one school over the requested window.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::SchoolNotFound`] when the school does not
    /// exist, or [`ApiError::Storage`] when a fetch fails.
    pub async fn school(
        &self,
        school_id: Uuid,
        days: Option<&str>,
    ) -> Result<SchoolMetrics, ApiError> {
        let window = DateWindow::from_query(days, Utc::now().date_naive());

        let (school, scored, sections) = tokio::join!(
            self.store.school(school_id),
            self.store.school_reviews_in(school_id, window),
            self.store.section_ratings_in(school_id, window),
        );

        let school = school?.ok_or(ApiError::SchoolNotFound(school_id))?;

        let events: Vec<EventRecord> = scored?
            .into_iter()
            .map(|row| EventRecord {
                occurred_at: row.created_at,
                score: row.score,
            })
            .collect();
        let ratings: Vec<SectionRating> = sections?
            .into_iter()
            .map(|(section_key, rating)| SectionRating {
                section_key,
                rating,
            })
            .collect();

        let tally = DailyTally::collect(&events);
        let scores = ScoreTally::collect(&events);

        Ok(SchoolMetrics {
            school,
            daily_series: school_days(window, &tally, &scores),
            section_averages: section_averages(&ratings),
        })
    }
}
