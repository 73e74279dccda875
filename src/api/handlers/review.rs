//! Review moderation handlers: edit, delete, helpful votes, reports.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{patch, post};
use axum::{Json, Router};

use crate::api::dto::{
    HelpfulVoteRequest, HelpfulVoteResponse, ReportAcceptedResponse, ReportReviewRequest,
    ReviewIdDto, ReviewIdResponse, ReviewUpdatedResponse, UpdateReviewRequest,
};
use crate::app_state::AppState;
use crate::auth::Identity;
use crate::error::{ApiError, ErrorResponse};
use crate::service::review_service::ReviewUpdate;

/// `PATCH /reviews/:id` — Edit a review's text and section ratings.
///
/// # Errors
///
/// Returns [`ApiError`] when the review is missing, the caller may not
/// edit it, or the section payload is invalid.
#[utoipa::path(
    patch,
    path = "/api/v1/reviews/{id}",
    tag = "Reviews",
    summary = "Edit a review",
    description = "Updates title and body, and replaces section ratings when provided. Only the author or an admin may edit. The overall score is recomputed by the database from section ratings.",
    params(
        ("id" = uuid::Uuid, Path, description = "Review UUID"),
    ),
    request_body = UpdateReviewRequest,
    responses(
        (status = 200, description = "Review updated", body = ReviewUpdatedResponse),
        (status = 400, description = "Invalid section payload", body = ErrorResponse),
        (status = 401, description = "Missing identity", body = ErrorResponse),
        (status = 403, description = "Caller may not edit this review", body = ErrorResponse),
        (status = 404, description = "Review not found", body = ErrorResponse),
    )
)]
pub async fn update_review(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<uuid::Uuid>,
    Json(req): Json<UpdateReviewRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let update = ReviewUpdate {
        title: req.title,
        body: req.body,
        sections: req
            .sections
            .map(|sections| sections.into_iter().map(Into::into).collect()),
    };

    let updated = state.reviews.update(identity, id, update).await?;

    Ok(Json(ReviewUpdatedResponse::from(updated)))
}

/// `DELETE /reviews/:id` — Delete a review.
///
/// # Errors
///
/// Returns [`ApiError`] when the review is missing or the caller may
/// not delete it.
#[utoipa::path(
    delete,
    path = "/api/v1/reviews/{id}",
    tag = "Reviews",
    summary = "Delete a review",
    description = "Removes a review. Only the author or an admin may delete.",
    params(
        ("id" = uuid::Uuid, Path, description = "Review UUID"),
    ),
    responses(
        (status = 200, description = "Review deleted", body = ReviewIdResponse),
        (status = 401, description = "Missing identity", body = ErrorResponse),
        (status = 403, description = "Caller may not delete this review", body = ErrorResponse),
        (status = 404, description = "Review not found", body = ErrorResponse),
    )
)]
pub async fn delete_review(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state.reviews.delete(identity, id).await?;

    Ok(Json(ReviewIdResponse {
        data: ReviewIdDto { id },
    }))
}

/// `POST /reviews/:id/helpful` — Cast or withdraw a helpful vote.
///
/// # Errors
///
/// Returns [`ApiError::ReviewNotFound`] when the review is missing.
#[utoipa::path(
    post,
    path = "/api/v1/reviews/{id}/helpful",
    tag = "Reviews",
    summary = "Toggle a helpful vote",
    description = "Casts (`like: true`) or withdraws (`like: false`) the caller's helpful vote and returns the resulting count. Voting twice is a no-op.",
    params(
        ("id" = uuid::Uuid, Path, description = "Review UUID"),
    ),
    request_body = HelpfulVoteRequest,
    responses(
        (status = 200, description = "Vote state after the change", body = HelpfulVoteResponse),
        (status = 401, description = "Missing identity", body = ErrorResponse),
        (status = 404, description = "Review not found", body = ErrorResponse),
    )
)]
pub async fn helpful_vote(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<uuid::Uuid>,
    Json(req): Json<HelpfulVoteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let vote = state.reviews.set_helpful(identity, id, req.like).await?;

    Ok(Json(HelpfulVoteResponse::from(vote)))
}

/// `POST /reviews/:id/report` — File a moderation report.
///
/// # Errors
///
/// Returns [`ApiError::InvalidRequest`] when the reason is missing and
/// [`ApiError::ReviewNotFound`] when the review is missing.
#[utoipa::path(
    post,
    path = "/api/v1/reviews/{id}/report",
    tag = "Reviews",
    summary = "Report a review",
    description = "Files a moderation report with a required reason and optional details.",
    params(
        ("id" = uuid::Uuid, Path, description = "Review UUID"),
    ),
    request_body = ReportReviewRequest,
    responses(
        (status = 201, description = "Report filed", body = ReportAcceptedResponse),
        (status = 400, description = "Missing reason", body = ErrorResponse),
        (status = 401, description = "Missing identity", body = ErrorResponse),
        (status = 404, description = "Review not found", body = ErrorResponse),
    )
)]
pub async fn report_review(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<uuid::Uuid>,
    Json(req): Json<ReportReviewRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .reviews
        .report(identity, id, req.reason.as_deref(), req.details.as_deref())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ReportAcceptedResponse { ok: true }),
    ))
}

/// Review moderation routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reviews/{id}", patch(update_review).delete(delete_review))
        .route("/reviews/{id}/helpful", post(helpful_vote))
        .route("/reviews/{id}/report", post(report_review))
}
