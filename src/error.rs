//! API error types with HTTP status code mapping.
//!
//! [`ApiError`] is the central error type for the service. Each variant
//! maps to a specific HTTP status code and structured JSON error
//! response. The aggregation core itself never fails: malformed records
//! are excluded and degenerate inputs produce empty output, so errors
//! arise only at the HTTP boundary (identity, missing rows, storage,
//! invalid payloads).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 2001,
///     "message": "review not found: 6f9c…",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code (see code ranges on [`ApiError`]).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category        | HTTP Status                      |
/// |-----------|-----------------|----------------------------------|
/// | 1000–1999 | Validation      | 400 Bad Request                  |
/// | 2000–2999 | Not Found       | 404 Not Found                    |
/// | 3000–3999 | Server          | 500 Internal Server Error        |
/// | 4000–4999 | Identity        | 401 Unauthorized / 403 Forbidden |
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Request validation failed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Review with the given ID was not found (or is deleted).
    #[error("review not found: {0}")]
    ReviewNotFound(uuid::Uuid),

    /// School with the given ID was not found.
    #[error("school not found: {0}")]
    SchoolNotFound(uuid::Uuid),

    /// The request carried no usable identity headers.
    #[error("unauthorized")]
    Unauthorized,

    /// The caller's role does not permit the operation.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Storage layer failure.
    #[error("storage error: {0}")]
    Storage(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::ReviewNotFound(_) => 2001,
            Self::SchoolNotFound(_) => 2002,
            Self::Storage(_) => 3001,
            Self::Internal(_) => 3000,
            Self::Unauthorized => 4001,
            Self::Forbidden(_) => 4002,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::ReviewNotFound(_) | Self::SchoolNotFound(_) => StatusCode::NOT_FOUND,
            Self::Storage(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
