//! REST API layer: route handlers, DTOs, and router composition.
//!
//! All resource endpoints are mounted under `/api/v1`; system routes
//! (health, configuration catalogs) live at the root.

pub mod dto;
pub mod handlers;

use axum::Router;

use crate::app_state::AppState;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .nest("/api/v1", handlers::routes())
        .merge(handlers::system::routes())
}

/// OpenAPI document describing every REST endpoint.
#[cfg(feature = "swagger-ui")]
#[derive(Debug, utoipa::OpenApi)]
#[openapi(
    paths(
        handlers::metrics::dashboard_metrics,
        handlers::metrics::school_metrics,
        handlers::review::update_review,
        handlers::review::delete_review,
        handlers::review::helpful_vote,
        handlers::review::report_review,
        handlers::system::health_handler,
        handlers::system::rating_sections_handler,
    ),
    tags(
        (name = "Metrics", description = "Dashboard and school chart series"),
        (name = "Reviews", description = "Review moderation"),
        (name = "System", description = "Health and configuration"),
    )
)]
pub struct ApiDoc;
