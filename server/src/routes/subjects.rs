//! Subject Routes

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, Uri};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use crate::domain::Subject;
use crate::error::{ApiError, ApiResult};
use crate::extract::AuthUser;
use crate::pagination::{self, Page};
use crate::repository::Repository;
use crate::routes::{parse_opt, target};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/subjects/", get(list).post(create))
        .route("/api/subjects/{id}/", get(detail))
}

/// Subjects, paginated; filterable by program, semester and search text
async fn list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
    uri: Uri,
) -> ApiResult<Json<Page<Subject>>> {
    let page = pagination::page_param(&params)?;
    let program = parse_opt(&params, "program")?;
    let semester = parse_opt(&params, "semester")?;
    let search = params.get("search").map(String::as_str);

    let subjects = state.subjects.list_filtered(program, semester, search).await?;
    Ok(Json(pagination::paginate(subjects, page, target(&uri))?))
}

/// Single subject by id
async fn detail(State(state): State<AppState>, Path(id): Path<u32>) -> ApiResult<Json<Subject>> {
    let subject = state.subjects.find_by_id(id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(subject))
}

#[derive(Deserialize)]
struct SubjectForm {
    code: String,
    name: String,
    program: u32,
    semester: u8,
    credit_hours: Option<u8>,
}

/// Create a subject within a program and semester
async fn create(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
    Json(form): Json<SubjectForm>,
) -> ApiResult<(StatusCode, Json<Subject>)> {
    let subject = Subject {
        id: 0,
        code: form.code,
        name: form.name,
        program: form.program,
        program_name: String::new(),
        semester: form.semester,
        credit_hours: form.credit_hours.unwrap_or(3),
        is_active: true,
    };
    let created = state.subjects.create(&subject).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
