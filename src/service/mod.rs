//! Service layer: business logic orchestration.
//!
//! [`MetricsService`] joins concurrent store fetches and runs the
//! aggregation core; [`ReviewService`] handles moderation flows with
//! ownership checks.

pub mod metrics_service;
pub mod review_service;

pub use metrics_service::MetricsService;
pub use review_service::ReviewService;
