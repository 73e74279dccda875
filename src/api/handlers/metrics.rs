//! Metrics handlers: admin dashboard and staff school charts.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{DashboardMetricsResponse, MetricsQuery, SchoolMetricsResponse};
use crate::app_state::AppState;
use crate::auth::Identity;
use crate::error::{ApiError, ErrorResponse};

/// `GET /admin/metrics/dashboard` — Platform-wide daily activity series.
///
/// # Errors
///
/// Returns [`ApiError::Forbidden`] for non-admin callers.
#[utoipa::path(
    get,
    path = "/api/v1/admin/metrics/dashboard",
    tag = "Metrics",
    summary = "Admin dashboard series",
    description = "Returns a dense daily series of new reviews and new accounts over the requested window. Every window day appears exactly once, zero-filled when nothing happened.",
    params(MetricsQuery),
    responses(
        (status = 200, description = "Dense daily series", body = DashboardMetricsResponse),
        (status = 401, description = "Missing identity", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
    )
)]
pub async fn dashboard_metrics(
    State(state): State<AppState>,
    identity: Identity,
    Query(query): Query<MetricsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    identity.require_admin()?;

    let series = state.metrics.dashboard(query.days.as_deref()).await?;

    Ok(Json(DashboardMetricsResponse {
        data: series.into_iter().map(Into::into).collect(),
    }))
}

/// `GET /staff/metrics/school` — Daily series and section averages for
/// the caller's school.
///
/// # Errors
///
/// Returns [`ApiError::Forbidden`] for non-staff callers and
/// [`ApiError::SchoolNotFound`] when the assigned school is gone.
#[utoipa::path(
    get,
    path = "/api/v1/staff/metrics/school",
    tag = "Metrics",
    summary = "Staff school series",
    description = "Returns the caller's school with a dense daily review series (count, mean score, trailing 7-day average) and per-section rating averages over the requested window.",
    params(MetricsQuery),
    responses(
        (status = 200, description = "School metrics payload", body = SchoolMetricsResponse),
        (status = 401, description = "Missing identity", body = ErrorResponse),
        (status = 403, description = "Caller is not staff or has no school", body = ErrorResponse),
        (status = 404, description = "School not found", body = ErrorResponse),
    )
)]
pub async fn school_metrics(
    State(state): State<AppState>,
    identity: Identity,
    Query(query): Query<MetricsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let school_id = identity.require_staff_school()?;

    let metrics = state
        .metrics
        .school(school_id, query.days.as_deref())
        .await?;

    Ok(Json(SchoolMetricsResponse::from(metrics)))
}

/// Metrics routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin/metrics/dashboard", get(dashboard_metrics))
        .route("/staff/metrics/school", get(school_metrics))
}
