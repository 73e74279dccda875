//! Review service: moderation flows over the review store.
//!
//! Every mutation follows the same pattern: load the review, check
//! that the caller may act on it, apply the change, log the outcome.

use uuid::Uuid;

use crate::auth::Identity;
use crate::domain::SectionEntry;
use crate::domain::review_rules::{has_rating, invalid_rating, normalize_sections};
use crate::error::ApiError;
use crate::persistence::PostgresStore;
use crate::persistence::models::ReviewRow;

/// A review edit: absent fields leave the stored value unchanged.
#[derive(Debug, Clone, Default)]
pub struct ReviewUpdate {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement body.
    pub body: Option<String>,
    /// Replacement section ratings.
    pub sections: Option<Vec<SectionEntry>>,
}

/// Outcome of a review edit.
#[derive(Debug, Clone, Copy)]
pub struct UpdatedReview {
    /// The edited review.
    pub id: Uuid,
    /// Overall score recomputed by the database, when sections were
    /// replaced.
    pub rating_computed: Option<f64>,
}

/// Outcome of a helpful-vote toggle.
#[derive(Debug, Clone, Copy)]
pub struct HelpfulVote {
    /// The voted review.
    pub review_id: Uuid,
    /// Total helpful votes after the change.
    pub helpful_count: i64,
    /// Whether the caller's vote is now cast.
    pub helpful_voted: bool,
}

/// Moderation flows: edit, delete, vote, report.
#[derive(Debug, Clone)]
pub struct ReviewService {
    store: PostgresStore,
}

impl ReviewService {
    /// Creates a new `ReviewService`.
    #[must_use]
    pub fn new(store: PostgresStore) -> Self {
        Self { store }
    }

    /// Edits a review's text and/or replaces its section ratings.
    ///
    /// Only the author or an admin may edit. Section payloads are
    /// normalized first; every supplied rating must sit on the
    /// half-step grid and at least one section must be rated.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ReviewNotFound`] for missing or deleted
    /// reviews, [`ApiError::Forbidden`] for other callers, and
    /// [`ApiError::InvalidRequest`] for bad section payloads.
    pub async fn update(
        &self,
        caller: Identity,
        review_id: Uuid,
        update: ReviewUpdate,
    ) -> Result<UpdatedReview, ApiError> {
        let review = self.live_review(review_id).await?;
        if !caller.can_moderate(review.user_id) {
            return Err(ApiError::Forbidden(
                "only the author or an admin may edit a review".to_string(),
            ));
        }

        if update.title.is_some() || update.body.is_some() {
            self.store
                .update_review_text(review_id, update.title.as_deref(), update.body.as_deref())
                .await?;
        }

        let mut rating_computed = None;
        if let Some(sections) = update.sections {
            let sections = normalize_sections(&sections);
            if let Some(bad) = invalid_rating(&sections) {
                return Err(ApiError::InvalidRequest(format!(
                    "rating {bad} is not a half step between 1 and 5"
                )));
            }
            if !has_rating(&sections) {
                return Err(ApiError::InvalidRequest(
                    "rate at least one section".to_string(),
                ));
            }
            self.store.upsert_sections(review_id, &sections).await?;
            rating_computed = self.store.computed_score(review_id).await?;
        }

        tracing::info!(%review_id, "review updated");
        Ok(UpdatedReview {
            id: review_id,
            rating_computed,
        })
    }

    /// Deletes a review. Only the author or an admin may delete.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ReviewNotFound`] for missing reviews and
    /// [`ApiError::Forbidden`] for other callers.
    pub async fn delete(&self, caller: Identity, review_id: Uuid) -> Result<(), ApiError> {
        let review = self
            .store
            .find_review(review_id)
            .await?
            .ok_or(ApiError::ReviewNotFound(review_id))?;
        if !caller.can_moderate(review.user_id) {
            return Err(ApiError::Forbidden(
                "only the author or an admin may delete a review".to_string(),
            ));
        }

        self.store.delete_review(review_id).await?;
        tracing::info!(%review_id, "review deleted");
        Ok(())
    }

    /// Casts or withdraws the caller's helpful vote and returns the
    /// resulting vote count. Casting twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ReviewNotFound`] for missing or deleted
    /// reviews, or [`ApiError::Storage`] on database failure.
    pub async fn set_helpful(
        &self,
        caller: Identity,
        review_id: Uuid,
        like: bool,
    ) -> Result<HelpfulVote, ApiError> {
        self.live_review(review_id).await?;

        if like {
            self.store
                .insert_helpful_vote(review_id, caller.user_id)
                .await?;
        } else {
            self.store
                .delete_helpful_vote(review_id, caller.user_id)
                .await?;
        }
        let helpful_count = self.store.helpful_vote_count(review_id).await?;

        tracing::info!(%review_id, voted = like, "helpful vote updated");
        Ok(HelpfulVote {
            review_id,
            helpful_count,
            helpful_voted: like,
        })
    }

    /// Files a moderation report against a review.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] when the reason is missing
    /// or blank, [`ApiError::ReviewNotFound`] for missing or deleted
    /// reviews, or [`ApiError::Storage`] on database failure.
    pub async fn report(
        &self,
        caller: Identity,
        review_id: Uuid,
        reason: Option<&str>,
        details: Option<&str>,
    ) -> Result<(), ApiError> {
        let reason = reason
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .ok_or_else(|| ApiError::InvalidRequest("missing reason for report".to_string()))?;

        self.live_review(review_id).await?;
        self.store
            .insert_report(review_id, caller.user_id, reason, details)
            .await?;

        tracing::info!(%review_id, "review reported");
        Ok(())
    }

    /// Loads a review that exists and is not soft-deleted.
    async fn live_review(&self, review_id: Uuid) -> Result<ReviewRow, ApiError> {
        self.store
            .find_review(review_id)
            .await?
            .filter(|review| review.deleted_at.is_none())
            .ok_or(ApiError::ReviewNotFound(review_id))
    }
}
