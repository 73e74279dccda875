//! System endpoints: health check and the rating-section catalog.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    status: String,
    timestamp: String,
    version: String,
}

/// `GET /health` — Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health status, version, and current timestamp.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// One rating dimension the platform understands.
#[derive(Debug, Serialize, ToSchema)]
pub struct SectionInfo {
    section_key: &'static str,
    label: &'static str,
    description: &'static str,
}

/// `GET /config/rating-sections` — List known rating sections.
#[utoipa::path(
    get,
    path = "/config/rating-sections",
    tag = "System",
    summary = "List rating sections",
    description = "Returns metadata for every rating dimension reviews can score.",
    responses(
        (status = 200, description = "Rating section catalog", body = Vec<SectionInfo>),
    )
)]
pub async fn rating_sections_handler() -> impl IntoResponse {
    let sections = vec![
        SectionInfo {
            section_key: "teaching",
            label: "Teaching",
            description: "Quality of instruction and teacher engagement",
        },
        SectionInfo {
            section_key: "safety",
            label: "Safety",
            description: "Physical and emotional safety on campus",
        },
        SectionInfo {
            section_key: "facilities",
            label: "Facilities",
            description: "Buildings, equipment, and learning spaces",
        },
        SectionInfo {
            section_key: "leadership",
            label: "Leadership",
            description: "School administration and direction",
        },
    ];
    (StatusCode::OK, Json(sections))
}

/// System routes mounted at the root level (not under /api/v1).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/config/rating-sections", get(rating_sections_handler))
}
