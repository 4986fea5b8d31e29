//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    /// Request is valid but the backend is not in a state to serve it
    Conflict(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", msg)),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ApiError::new("BAD_REQUEST", msg)),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, ApiError::new("CONFLICT", msg)),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("INTERNAL_ERROR", msg),
            ),
        };

        (status, Json(error)).into_response()
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidDate(_) => AppError::BadRequest(err.to_string()),
            DomainError::EntryNotFound(_) | DomainError::NothingToExport => {
                AppError::NotFound(err.to_string())
            }
            DomainError::SessionInactive => AppError::Conflict(err.to_string()),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<DomainError>() {
            Ok(domain) => domain.into(),
            Err(other) => AppError::Internal(format!("{:#}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_domain_errors_map_to_status_codes() {
        let cases = [
            (DomainError::InvalidDate("x".into()), StatusCode::BAD_REQUEST),
            (DomainError::EntryNotFound("x".into()), StatusCode::NOT_FOUND),
            (DomainError::NothingToExport, StatusCode::NOT_FOUND),
            (DomainError::SessionInactive, StatusCode::CONFLICT),
        ];
        for (err, status) in cases {
            assert_eq!(AppError::from(err).into_response().status(), status);
        }
    }

    #[test]
    fn test_anyhow_wrapping_domain_error_keeps_its_status() {
        let wrapped: anyhow::Error = DomainError::SessionInactive.into();
        assert_eq!(AppError::from(wrapped).into_response().status(), StatusCode::CONFLICT);

        let plain = anyhow!("disk full");
        assert_eq!(
            AppError::from(plain).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
