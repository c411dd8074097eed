//! Auth Extractors
//!
//! `AuthUser` rejects requests without a live bearer token;
//! `MaybeAuthUser` is for read-mostly routes where auth only changes
//! what the caller may do next.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::auth::hash_token;
use crate::domain::User;
use crate::error::ApiError;
use crate::repository::TokenKind;
use crate::state::AppState;

/// The authenticated account behind the request
pub struct AuthUser(pub User);

/// Present when a valid bearer token was sent, None otherwise
pub struct MaybeAuthUser(pub Option<User>);

async fn user_from_parts(parts: &Parts, state: &AppState) -> Result<User, ApiError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(ApiError::NotAuthenticated)?;
    let token = header
        .strip_prefix("Bearer ")
        .ok_or(ApiError::NotAuthenticated)?;

    let user_id = state
        .tokens
        .find_valid(&hash_token(token), TokenKind::Access)
        .await?
        .ok_or(ApiError::InvalidToken)?;
    state
        .users
        .find_by_id(user_id)
        .await?
        .ok_or(ApiError::InvalidToken)
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        user_from_parts(parts, state).await.map(AuthUser)
    }
}

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        match user_from_parts(parts, state).await {
            Ok(user) => Ok(MaybeAuthUser(Some(user))),
            Err(ApiError::NotAuthenticated) => Ok(MaybeAuthUser(None)),
            Err(other) => Err(other),
        }
    }
}
