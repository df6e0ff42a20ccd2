//! API error type and domain error mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::response::ApiResponse;
use crate::domain::DomainError;

/// API error with status code and response envelope fields
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub detail: Option<String>,
}

impl ApiError {
    /// Create a new API error
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            detail: None,
        }
    }

    /// Attach an error detail to the envelope
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    /// Internal server error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiResponse::<()>::failure(self.message, self.detail);

        (self.status, Json(body)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        let detail = err.to_string();

        match &err {
            DomainError::NotFound { .. } => Self::not_found("User not found"),
            DomainError::InvalidId { .. } => {
                Self::bad_request("Invalid user ID").with_detail(detail)
            }
            DomainError::InvalidName { .. } | DomainError::InvalidEmail { .. } => {
                Self::bad_request("Invalid user data").with_detail(detail)
            }
            DomainError::AlreadyExists { .. } => {
                Self::conflict("User with this email already exists")
            }
            DomainError::EmailTaken { .. } => {
                Self::conflict("Email already taken by another user")
            }
            DomainError::Configuration { .. }
            | DomainError::Storage { .. }
            | DomainError::Internal { .. } => {
                Self::internal("Internal server error").with_detail(detail)
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl std::error::Error for ApiError {}
