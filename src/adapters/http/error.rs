//! Shared HTTP error response shape and status mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Uniform error body for every endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new("NOT_FOUND", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }
}

/// Builds a response with the given status and error body.
pub fn error_response(status: StatusCode, body: ErrorResponse) -> Response {
    (status, Json(body)).into_response()
}

/// Maps a domain error onto an HTTP response.
pub fn domain_error_response(err: &DomainError) -> Response {
    let status = match err.code {
        ErrorCode::ValidationFailed
        | ErrorCode::EmptyField
        | ErrorCode::OutOfRange
        | ErrorCode::InvalidFormat => StatusCode::BAD_REQUEST,
        ErrorCode::PathwayNotFound
        | ErrorCode::ConsultationNotFound
        | ErrorCode::NodeNotFound
        | ErrorCode::SelectionNotFound => StatusCode::NOT_FOUND,
        ErrorCode::DanglingReference
        | ErrorCode::ConsultationConcluded
        | ErrorCode::ConsultationActive
        | ErrorCode::AlreadyAtStart => StatusCode::CONFLICT,
        ErrorCode::StorageError | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    };
    error_response(
        status,
        ErrorResponse::new(err.code.to_string(), err.message.clone()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_not_found_codes_to_404() {
        let err = DomainError::new(ErrorCode::ConsultationNotFound, "gone");
        let response = domain_error_response(&err);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn maps_state_conflicts_to_409() {
        let err = DomainError::new(ErrorCode::AlreadyAtStart, "at root");
        let response = domain_error_response(&err);
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn maps_validation_to_400() {
        let err = DomainError::new(ErrorCode::OutOfRange, "age");
        let response = domain_error_response(&err);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
