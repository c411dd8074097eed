//! HTTP Routes
//!
//! One module per resource. Every module exposes a `router()` that is
//! merged into the app router here; shared request plumbing (query
//! parsing, pagination link targets, multipart errors) lives at this
//! level.

mod colleges;
mod events;
mod health;
mod notes;
mod programs;
mod question_papers;
mod search;
mod subjects;
mod syllabus;
mod todos;
mod users;

use std::collections::HashMap;
use std::str::FromStr;

use axum::extract::multipart::MultipartError;
use axum::extract::DefaultBodyLimit;
use axum::http::Uri;
use axum::routing::get;
use axum::Router;

use crate::domain::validation::MAX_UPLOAD_SIZE;
use crate::domain::DomainError;
use crate::error::{ApiError, ApiResult};
use crate::media;
use crate::state::AppState;

pub fn app_router() -> Router<AppState> {
    Router::new()
        .route("/", get(health::api_root))
        .route("/health-check/", get(health::health_check))
        .route("/api/search/", get(search::search))
        .route("/media/{*path}", get(media::serve))
        .merge(users::router())
        .merge(programs::router())
        .merge(subjects::router())
        .merge(notes::router())
        .merge(syllabus::router())
        .merge(question_papers::router())
        .merge(colleges::router())
        .merge(events::router())
        .merge(todos::router())
        // Room for a 5 MB document plus multipart framing; the upload
        // validator stays the authoritative size check.
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_SIZE + 64 * 1024))
}

/// Path plus query string of the request, for pagination links
fn target(uri: &Uri) -> &str {
    uri.path_and_query().map(|pq| pq.as_str()).unwrap_or_else(|| uri.path())
}

/// Parse an optional numeric query parameter, 400 on junk
fn parse_opt<T: FromStr>(params: &HashMap<String, String>, name: &str) -> ApiResult<Option<T>> {
    match params.get(name) {
        None => Ok(None),
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| ApiError::BadRequest(format!("{name} must be a valid integer"))),
    }
}

/// Malformed multipart bodies are client errors
fn multipart_err(err: MultipartError) -> ApiError {
    ApiError::BadRequest(err.to_string())
}

/// Unknown ids on detail actions render the plain 404 body
fn detail_404(err: DomainError) -> ApiError {
    match err {
        DomainError::NotFound(_) => ApiError::NotFound,
        other => other.into(),
    }
}
