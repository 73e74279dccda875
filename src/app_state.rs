//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::service::{MetricsService, ReviewService};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Read-side metrics aggregation.
    pub metrics: Arc<MetricsService>,
    /// Review moderation flows.
    pub reviews: Arc<ReviewService>,
}
