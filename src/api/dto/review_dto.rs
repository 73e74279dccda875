//! Review moderation DTOs: edit, delete, helpful votes, reports.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::SectionEntry;
use crate::service::review_service::{HelpfulVote, UpdatedReview};

/// Request body for `PATCH /reviews/:id`. Absent fields leave the
/// stored value unchanged.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateReviewRequest {
    /// Replacement review title.
    #[serde(default)]
    pub title: Option<String>,
    /// Replacement review body.
    #[serde(default)]
    pub body: Option<String>,
    /// Replacement section ratings.
    #[serde(default)]
    pub sections: Option<Vec<SectionEntryDto>>,
}

/// One section rating in a review edit.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SectionEntryDto {
    /// Rating dimension key, e.g. `"teaching"`.
    #[serde(alias = "sectionKey")]
    pub section_key: String,
    /// Rating in half steps from 1.0 to 5.0.
    #[serde(default)]
    pub rating: Option<f64>,
    /// Free-text comment for the section.
    #[serde(default)]
    pub comment: Option<String>,
}

impl From<SectionEntryDto> for SectionEntry {
    fn from(dto: SectionEntryDto) -> Self {
        Self {
            section_key: dto.section_key,
            rating: dto.rating,
            comment: dto.comment,
        }
    }
}

/// Edited review returned by `PATCH /reviews/:id`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewUpdatedDto {
    /// The edited review.
    pub id: Uuid,
    /// Overall score recomputed from section ratings, present when
    /// sections were replaced.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_computed: Option<f64>,
}

/// Response body for `PATCH /reviews/:id`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewUpdatedResponse {
    /// Edited review payload.
    pub data: ReviewUpdatedDto,
}

impl From<UpdatedReview> for ReviewUpdatedResponse {
    fn from(updated: UpdatedReview) -> Self {
        Self {
            data: ReviewUpdatedDto {
                id: updated.id,
                rating_computed: updated.rating_computed,
            },
        }
    }
}

/// Review reference returned by `DELETE /reviews/:id`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewIdDto {
    /// The deleted review.
    pub id: Uuid,
}

/// Response body for `DELETE /reviews/:id`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewIdResponse {
    /// Deleted review reference.
    pub data: ReviewIdDto,
}

/// Request body for `POST /reviews/:id/helpful`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct HelpfulVoteRequest {
    /// `true` casts the caller's vote, `false` withdraws it.
    #[serde(default)]
    pub like: bool,
}

/// Helpful-vote state returned by `POST /reviews/:id/helpful`.
#[derive(Debug, Serialize, ToSchema)]
pub struct HelpfulVoteDto {
    /// The voted review.
    pub review_id: Uuid,
    /// Total helpful votes after the change.
    pub helpful_count: i64,
    /// Whether the caller's vote is now cast.
    pub helpful_voted: bool,
}

/// Response body for `POST /reviews/:id/helpful`.
#[derive(Debug, Serialize, ToSchema)]
pub struct HelpfulVoteResponse {
    /// Helpful-vote state payload.
    pub data: HelpfulVoteDto,
}

impl From<HelpfulVote> for HelpfulVoteResponse {
    fn from(vote: HelpfulVote) -> Self {
        Self {
            data: HelpfulVoteDto {
                review_id: vote.review_id,
                helpful_count: vote.helpful_count,
                helpful_voted: vote.helpful_voted,
            },
        }
    }
}

/// Request body for `POST /reviews/:id/report`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ReportReviewRequest {
    /// Why the review is being reported. Required; a missing or blank
    /// reason is rejected with 400.
    #[serde(default)]
    pub reason: Option<String>,
    /// Optional free-text details.
    #[serde(default)]
    pub details: Option<String>,
}

/// Response body for `POST /reviews/:id/report` (201 Created).
#[derive(Debug, Serialize, ToSchema)]
pub struct ReportAcceptedResponse {
    /// Always `true` on success.
    pub ok: bool,
}
