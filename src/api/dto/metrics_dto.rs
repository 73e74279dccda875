//! Metrics DTOs for the admin dashboard and staff school charts.

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{DashboardDay, SchoolDay, SectionAverage};
use crate::persistence::models::School;
use crate::service::metrics_service::SchoolMetrics;

/// One day of the admin dashboard series.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DashboardPointDto {
    /// UTC calendar day (`YYYY-MM-DD`).
    pub date: NaiveDate,
    /// Reviews created on that day.
    pub reviews: u64,
    /// Accounts created on that day.
    pub users: u64,
}

impl From<DashboardDay> for DashboardPointDto {
    fn from(day: DashboardDay) -> Self {
        Self {
            date: day.date,
            reviews: day.reviews,
            users: day.users,
        }
    }
}

/// Response body for `GET /admin/metrics/dashboard`.
#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardMetricsResponse {
    /// Dense daily series, one entry per window day.
    pub data: Vec<DashboardPointDto>,
}

/// One day of the staff school series.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SchoolDayDto {
    /// UTC calendar day (`YYYY-MM-DD`).
    pub date: NaiveDate,
    /// Reviews created on that day.
    pub review_count: u64,
    /// Mean review score for the day; `null` on days without scored
    /// reviews.
    pub avg_score: Option<f64>,
    /// Trailing 7-day mean of `review_count`.
    pub reviews_7d: f64,
}

impl From<SchoolDay> for SchoolDayDto {
    fn from(day: SchoolDay) -> Self {
        Self {
            date: day.date,
            review_count: day.review_count,
            avg_score: day.avg_score,
            reviews_7d: day.reviews_7d,
        }
    }
}

/// Average rating for one section.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SectionAverageDto {
    /// Rating dimension key, e.g. `"teaching"`.
    pub section_key: String,
    /// Mean of the non-null ratings, rounded to two decimals.
    pub avg_rating: f64,
    /// Number of ratings behind the mean.
    pub count: u64,
}

impl From<SectionAverage> for SectionAverageDto {
    fn from(avg: SectionAverage) -> Self {
        Self {
            section_key: avg.section_key,
            avg_rating: avg.avg_rating,
            count: avg.count,
        }
    }
}

/// School reference included in the staff metrics payload.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SchoolRefDto {
    /// School id.
    pub id: Uuid,
    /// Display name.
    pub name: String,
}

impl From<School> for SchoolRefDto {
    fn from(school: School) -> Self {
        Self {
            id: school.id,
            name: school.name,
        }
    }
}

/// Staff school metrics payload.
#[derive(Debug, Serialize, ToSchema)]
pub struct SchoolMetricsDto {
    /// The staff member's school.
    pub school: SchoolRefDto,
    /// Dense daily series over the window.
    pub daily_series: Vec<SchoolDayDto>,
    /// Per-section rating averages, sorted by section key.
    pub section_averages: Vec<SectionAverageDto>,
}

/// Response body for `GET /staff/metrics/school`.
#[derive(Debug, Serialize, ToSchema)]
pub struct SchoolMetricsResponse {
    /// Staff school metrics payload.
    pub data: SchoolMetricsDto,
}

impl From<SchoolMetrics> for SchoolMetricsResponse {
    fn from(metrics: SchoolMetrics) -> Self {
        Self {
            data: SchoolMetricsDto {
                school: metrics.school.into(),
                daily_series: metrics.daily_series.into_iter().map(Into::into).collect(),
                section_averages: metrics
                    .section_averages
                    .into_iter()
                    .map(Into::into)
                    .collect(),
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn dates_serialize_as_iso_day_keys() {
        let Some(date) = NaiveDate::from_ymd_opt(2024, 1, 5) else {
            panic!("valid date");
        };
        let dto = DashboardPointDto {
            date,
            reviews: 2,
            users: 0,
        };
        let Ok(json) = serde_json::to_value(&dto) else {
            panic!("serialization failed");
        };
        assert_eq!(
            json,
            serde_json::json!({"date": "2024-01-05", "reviews": 2, "users": 0})
        );
    }
}
