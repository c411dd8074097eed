//! Program Routes
//!
//! Degree programs plus the grouped subjects listing the program page
//! renders (one block per semester).

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, Uri};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::domain::{slugify, Program};
use crate::error::{ApiError, ApiResult};
use crate::extract::AuthUser;
use crate::pagination::{self, Page};
use crate::repository::Repository;
use crate::routes::target;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/programs/", get(list).post(create))
        .route("/api/programs/{id}/", get(detail))
        .route("/api/programs/{id}/subjects/", get(subjects))
}

/// Active programs, paginated
async fn list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
    uri: Uri,
) -> ApiResult<Json<Page<Program>>> {
    let page = pagination::page_param(&params)?;
    let programs = state.programs.list_active().await?;
    Ok(Json(pagination::paginate(programs, page, target(&uri))?))
}

/// Single program by id
async fn detail(State(state): State<AppState>, Path(id): Path<u32>) -> ApiResult<Json<Program>> {
    let program = state.programs.find_by_id(id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(program))
}

/// Subjects of a program grouped by semester
async fn subjects(State(state): State<AppState>, Path(id): Path<u32>) -> ApiResult<Json<Value>> {
    let program = state.programs.find_by_id(id).await?.ok_or(ApiError::NotFound)?;
    let grouped = state.subjects.grouped_by_semester(id).await?;

    let semesters: Vec<Value> = grouped
        .into_iter()
        .map(|(semester, subjects)| json!({ "semester": semester, "subjects": subjects }))
        .collect();
    Ok(Json(json!({ "program": program, "semesters": semesters })))
}

#[derive(Deserialize)]
struct ProgramForm {
    name: String,
    slug: Option<String>,
    #[serde(default)]
    description: String,
    duration_years: Option<u8>,
}

/// Create a program; the slug defaults to a slugified name
async fn create(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
    Json(form): Json<ProgramForm>,
) -> ApiResult<(StatusCode, Json<Program>)> {
    let slug = form
        .slug
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| slugify(&form.name));

    let mut program = Program::new(0, form.name, slug);
    program.description = form.description;
    if let Some(years) = form.duration_years {
        program.duration_years = years;
    }

    let created = state.programs.create(&program).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
