//! Shared DTO types used across multiple endpoints.

use serde::Deserialize;
use utoipa::IntoParams;

/// Query parameters accepted by the metrics endpoints.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct MetricsQuery {
    /// Window length in calendar days. Clamped to 7..=365; absent or
    /// non-integer values fall back to 90.
    #[serde(default)]
    pub days: Option<String>,
}
