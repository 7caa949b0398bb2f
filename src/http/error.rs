//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::db::repository::RepositoryError;
use crate::scheduler::ScheduleError;

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
    /// Invalid request before it reached the engine
    BadRequest(String),
    /// Scheduling engine error
    Schedule(ScheduleError),
    /// Repository error from a direct store call
    Repository(RepositoryError),
    /// Internal server error
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ApiError::new("BAD_REQUEST", msg))
            }
            AppError::Schedule(err) => schedule_error_response(err),
            AppError::Repository(err) => repository_error_response(err),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("INTERNAL_ERROR", msg),
            ),
        };

        (status, Json(error)).into_response()
    }
}

fn schedule_error_response(err: ScheduleError) -> (StatusCode, ApiError) {
    match err {
        ScheduleError::Validation(msg) => {
            (StatusCode::BAD_REQUEST, ApiError::new("VALIDATION", msg))
        }
        ScheduleError::Forbidden => (
            StatusCode::FORBIDDEN,
            ApiError::new("FORBIDDEN", ScheduleError::Forbidden.to_string()),
        ),
        ScheduleError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", msg)),
        ScheduleError::Conflict(report) => (
            StatusCode::CONFLICT,
            ApiError::new("SCHEDULE_CONFLICT", "schedule conflict")
                .with_details(report.details()),
        ),
        ScheduleError::StoreUnavailable(source) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::new("STORE_UNAVAILABLE", source.to_string()),
        ),
        ScheduleError::Store(source) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::new("REPOSITORY_ERROR", source.to_string()),
        ),
    }
}

fn repository_error_response(err: RepositoryError) -> (StatusCode, ApiError) {
    match err {
        RepositoryError::NotFound { .. } => (
            StatusCode::NOT_FOUND,
            ApiError::new("NOT_FOUND", err.message().to_string()),
        ),
        RepositoryError::ValidationError { .. } => (
            StatusCode::BAD_REQUEST,
            ApiError::new("VALIDATION", err.message().to_string()),
        ),
        other => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::new("REPOSITORY_ERROR", other.to_string()),
        ),
    }
}

impl From<ScheduleError> for AppError {
    fn from(err: ScheduleError) -> Self {
        AppError::Schedule(err)
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        AppError::Repository(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}
