//! PostgreSQL implementation of the review store.
//!
//! All persistence is plain parameterized SQL against the platform's
//! Postgres schema; the tables are owned and validated by the managed
//! backend, this service only reads and writes rows. Metric fetches are
//! bounded by the window's half-open UTC range so out-of-window rows
//! never reach the aggregator.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::models::{ReviewRow, School, ScoredCreation};
use crate::domain::{DateWindow, SectionEntry};
use crate::error::ApiError;

/// PostgreSQL-backed review store using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a new store with the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creation timestamps of non-deleted reviews inside `window`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Storage`] on database failure.
    pub async fn review_created_in(
        &self,
        window: DateWindow,
    ) -> Result<Vec<Option<DateTime<Utc>>>, ApiError> {
        sqlx::query_scalar::<_, Option<DateTime<Utc>>>(
            "SELECT created_at FROM reviews \
             WHERE created_at >= $1 AND created_at < $2 AND deleted_at IS NULL",
        )
        .bind(window.start_utc())
        .bind(window.end_exclusive_utc())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ApiError::Storage(e.to_string()))
    }

    /// Creation timestamps of accounts inside `window`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Storage`] on database failure.
    pub async fn profile_created_in(
        &self,
        window: DateWindow,
    ) -> Result<Vec<Option<DateTime<Utc>>>, ApiError> {
        sqlx::query_scalar::<_, Option<DateTime<Utc>>>(
            "SELECT created_at FROM profiles WHERE created_at >= $1 AND created_at < $2",
        )
        .bind(window.start_utc())
        .bind(window.end_exclusive_utc())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ApiError::Storage(e.to_string()))
    }

    /// Creation timestamps and computed scores of one school's
    /// non-deleted reviews inside `window`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Storage`] on database failure.
    pub async fn school_reviews_in(
        &self,
        school_id: Uuid,
        window: DateWindow,
    ) -> Result<Vec<ScoredCreation>, ApiError> {
        let rows = sqlx::query_as::<_, (Option<DateTime<Utc>>, Option<f64>)>(
            "SELECT created_at, rating_computed FROM reviews \
             WHERE school_id = $1 AND created_at >= $2 AND created_at < $3 \
             AND deleted_at IS NULL",
        )
        .bind(school_id)
        .bind(window.start_utc())
        .bind(window.end_exclusive_utc())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ApiError::Storage(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|(created_at, score)| ScoredCreation { created_at, score })
            .collect())
    }

    /// Section ratings attached to one school's non-deleted reviews
    /// inside `window`, as `(section_key, rating)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Storage`] on database failure.
    pub async fn section_ratings_in(
        &self,
        school_id: Uuid,
        window: DateWindow,
    ) -> Result<Vec<(String, Option<f64>)>, ApiError> {
        sqlx::query_as::<_, (String, Option<f64>)>(
            "SELECT rs.section_key, rs.rating FROM review_sections rs \
             JOIN reviews r ON r.id = rs.review_id \
             WHERE r.school_id = $1 AND r.created_at >= $2 AND r.created_at < $3 \
             AND r.deleted_at IS NULL",
        )
        .bind(school_id)
        .bind(window.start_utc())
        .bind(window.end_exclusive_utc())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ApiError::Storage(e.to_string()))
    }

    /// Looks up a school by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Storage`] on database failure.
    pub async fn school(&self, school_id: Uuid) -> Result<Option<School>, ApiError> {
        let row = sqlx::query_as::<_, (Uuid, String)>("SELECT id, name FROM schools WHERE id = $1")
            .bind(school_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ApiError::Storage(e.to_string()))?;

        Ok(row.map(|(id, name)| School { id, name }))
    }

    /// Looks up a review by id, deleted or not.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Storage`] on database failure.
    pub async fn find_review(&self, review_id: Uuid) -> Result<Option<ReviewRow>, ApiError> {
        let row = sqlx::query_as::<_, (Uuid, Uuid, Uuid, Option<DateTime<Utc>>)>(
            "SELECT id, user_id, school_id, deleted_at FROM reviews WHERE id = $1",
        )
        .bind(review_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ApiError::Storage(e.to_string()))?;

        Ok(row.map(|(id, user_id, school_id, deleted_at)| ReviewRow {
            id,
            user_id,
            school_id,
            deleted_at,
        }))
    }

    /// Updates a review's text fields; `None` leaves a field unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Storage`] on database failure.
    pub async fn update_review_text(
        &self,
        review_id: Uuid,
        title: Option<&str>,
        body: Option<&str>,
    ) -> Result<(), ApiError> {
        sqlx::query(
            "UPDATE reviews SET title = COALESCE($2, title), body = COALESCE($3, body) \
             WHERE id = $1",
        )
        .bind(review_id)
        .bind(title)
        .bind(body)
        .execute(&self.pool)
        .await
        .map_err(|e| ApiError::Storage(e.to_string()))?;
        Ok(())
    }

    /// Upserts section ratings for a review, keyed on
    /// `(review_id, section_key)`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Storage`] on database failure.
    pub async fn upsert_sections(
        &self,
        review_id: Uuid,
        sections: &[SectionEntry],
    ) -> Result<(), ApiError> {
        for section in sections {
            sqlx::query(
                "INSERT INTO review_sections (review_id, section_key, rating, comment) \
                 VALUES ($1, $2, $3, $4) \
                 ON CONFLICT (review_id, section_key) \
                 DO UPDATE SET rating = EXCLUDED.rating, comment = EXCLUDED.comment",
            )
            .bind(review_id)
            .bind(&section.section_key)
            .bind(section.rating)
            .bind(section.comment.as_deref())
            .execute(&self.pool)
            .await
            .map_err(|e| ApiError::Storage(e.to_string()))?;
        }
        Ok(())
    }

    /// Overall score recomputed by the database after a section upsert.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Storage`] on database failure.
    pub async fn computed_score(&self, review_id: Uuid) -> Result<Option<f64>, ApiError> {
        let row = sqlx::query_scalar::<_, Option<f64>>(
            "SELECT rating_computed FROM reviews WHERE id = $1",
        )
        .bind(review_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ApiError::Storage(e.to_string()))?;

        Ok(row.flatten())
    }

    /// Deletes a review row.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Storage`] on database failure.
    pub async fn delete_review(&self, review_id: Uuid) -> Result<(), ApiError> {
        sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(review_id)
            .execute(&self.pool)
            .await
            .map_err(|e| ApiError::Storage(e.to_string()))?;
        Ok(())
    }

    /// Records a helpful vote; voting twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Storage`] on database failure.
    pub async fn insert_helpful_vote(
        &self,
        review_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), ApiError> {
        sqlx::query(
            "INSERT INTO review_helpful_votes (review_id, user_id) VALUES ($1, $2) \
             ON CONFLICT DO NOTHING",
        )
        .bind(review_id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| ApiError::Storage(e.to_string()))?;
        Ok(())
    }

    /// Withdraws a helpful vote, if present.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Storage`] on database failure.
    pub async fn delete_helpful_vote(
        &self,
        review_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), ApiError> {
        sqlx::query("DELETE FROM review_helpful_votes WHERE review_id = $1 AND user_id = $2")
            .bind(review_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| ApiError::Storage(e.to_string()))?;
        Ok(())
    }

    /// Counts helpful votes for a review.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Storage`] on database failure.
    pub async fn helpful_vote_count(&self, review_id: Uuid) -> Result<i64, ApiError> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM review_helpful_votes WHERE review_id = $1",
        )
        .bind(review_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| ApiError::Storage(e.to_string()))
    }

    /// Files a moderation report against a review.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Storage`] on database failure.
    pub async fn insert_report(
        &self,
        review_id: Uuid,
        reporter_id: Uuid,
        reason: &str,
        details: Option<&str>,
    ) -> Result<(), ApiError> {
        sqlx::query(
            "INSERT INTO review_reports (review_id, reporter_id, reason, details) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(review_id)
        .bind(reporter_id)
        .bind(reason)
        .bind(details)
        .execute(&self.pool)
        .await
        .map_err(|e| ApiError::Storage(e.to_string()))?;
        Ok(())
    }
}
