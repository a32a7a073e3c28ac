//! HTTP error handling and response types.

use axum::{
    extract::{multipart::MultipartRejection, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::services::IdentifyError;
use crate::upstream::FetchError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Invalid request (validation error)
    BadRequest(String),
    /// Upstream answered with a non-2xx status
    Upstream { status: u16, body: String },
    /// Upstream could not be reached
    Unavailable(String),
    /// Internal server error
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ApiError::new("BAD_REQUEST", msg),
            ),
            AppError::Upstream { status, body } => (
                // Out-of-range codes cannot come from a real response.
                StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                ApiError::new("UPSTREAM_ERROR", format!("iNaturalist API error: {}", body))
                    .with_details(body),
            ),
            AppError::Unavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                ApiError::new(
                    "SERVICE_UNAVAILABLE",
                    format!("Failed to connect to iNaturalist API: {}", msg),
                ),
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("INTERNAL_ERROR", format!("Internal server error: {}", msg)),
            ),
        };

        (status, Json(error)).into_response()
    }
}

impl From<FetchError> for AppError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Upstream { status, body } => AppError::Upstream { status, body },
            FetchError::Unavailable(msg) => AppError::Unavailable(msg),
            FetchError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<IdentifyError> for AppError {
    fn from(err: IdentifyError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<MultipartRejection> for AppError {
    fn from(rejection: MultipartRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}
