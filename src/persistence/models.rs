//! Row types returned by the review store.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A review row as read for moderation checks.
#[derive(Debug, Clone)]
pub struct ReviewRow {
    /// Review id.
    pub id: Uuid,
    /// Author account id.
    pub user_id: Uuid,
    /// School the review belongs to.
    pub school_id: Uuid,
    /// Soft-delete marker; a set value hides the review everywhere.
    pub deleted_at: Option<DateTime<Utc>>,
}

/// A review's creation instant and computed overall score, as fetched
/// for the school chart series.
#[derive(Debug, Clone, Copy)]
pub struct ScoredCreation {
    /// Creation timestamp, when the row carries one.
    pub created_at: Option<DateTime<Utc>>,
    /// Overall score computed by the database from section ratings.
    pub score: Option<f64>,
}

/// A school row.
#[derive(Debug, Clone)]
pub struct School {
    /// School id.
    pub id: Uuid,
    /// Display name.
    pub name: String,
}
