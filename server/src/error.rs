//! API Error Type
//!
//! One error enum for the HTTP layer. `IntoResponse` renders the wire
//! bodies the web client was built against: auth failures use
//! `{"detail": ...}`, action-level validation uses `{"error": ...}`,
//! form validation uses per-field message maps, and anything unexpected
//! collapses to a logged 500.

use std::collections::HashMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::domain::DomainError;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication credentials were not provided.")]
    NotAuthenticated,

    #[error("Given token not valid for any token type")]
    InvalidToken,

    #[error("No active account found with the given credentials")]
    BadCredentials,

    #[error("You do not have permission to perform this action.")]
    PermissionDenied,

    /// Detail-route 404, `{"detail": "Not found."}`
    #[error("Not found.")]
    NotFound,

    /// Page number past the end of a listing, `{"detail": "Invalid page."}`
    #[error("Invalid page.")]
    InvalidPage,

    /// Detail 404 with a custom message, `{"detail": msg}`
    #[error("{0}")]
    NotFoundDetail(String),

    /// Detail 403 with a custom message, `{"detail": msg}`
    #[error("{0}")]
    ForbiddenDetail(String),

    /// Custom-action 404, `{"error": msg}`
    #[error("{0}")]
    MissingResource(String),

    /// Custom-action 400, `{"error": msg}`
    #[error("{0}")]
    BadRequest(String),

    /// Registration-flow 400, `{"status": "error", "message": msg}`
    #[error("{0}")]
    StatusMessage(String),

    /// Form validation 400, `{"field": ["msg", ...]}`
    #[error("validation failed")]
    Fields(HashMap<String, Vec<String>>),

    #[error("{0}")]
    Internal(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ApiError {
    /// Single-field validation error
    pub fn field(name: &str, message: &str) -> Self {
        let mut map = HashMap::new();
        map.insert(name.to_string(), vec![message.to_string()]);
        ApiError::Fields(map)
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound(msg) => ApiError::MissingResource(msg),
            DomainError::InvalidInput(msg) => ApiError::BadRequest(msg),
            DomainError::Conflict(msg) => ApiError::BadRequest(msg),
            DomainError::Internal(msg) => ApiError::Internal(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::NotAuthenticated | ApiError::InvalidToken | ApiError::BadCredentials => {
                (StatusCode::UNAUTHORIZED, json!({ "detail": self.to_string() }))
            }
            ApiError::PermissionDenied => {
                (StatusCode::FORBIDDEN, json!({ "detail": self.to_string() }))
            }
            ApiError::NotFound | ApiError::InvalidPage | ApiError::NotFoundDetail(_) => {
                (StatusCode::NOT_FOUND, json!({ "detail": self.to_string() }))
            }
            ApiError::ForbiddenDetail(msg) => (StatusCode::FORBIDDEN, json!({ "detail": msg })),
            ApiError::MissingResource(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            ApiError::StatusMessage(msg) => (
                StatusCode::BAD_REQUEST,
                json!({ "status": "error", "message": msg }),
            ),
            ApiError::Fields(map) => (StatusCode::BAD_REQUEST, json!(map)),
            ApiError::Internal(_) | ApiError::Io(_) => {
                error!("unhandled error: {self}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": self.to_string(), "detail": "An unexpected error occurred." }),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_mapping() {
        let err: ApiError = DomainError::NotFound("Subject does not exist".into()).into();
        assert!(matches!(err, ApiError::MissingResource(_)));

        let err: ApiError = DomainError::InvalidInput("bad semester".into()).into();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[test]
    fn test_auth_strings() {
        assert_eq!(
            ApiError::NotAuthenticated.to_string(),
            "Authentication credentials were not provided."
        );
        assert_eq!(
            ApiError::PermissionDenied.to_string(),
            "You do not have permission to perform this action."
        );
    }
}
