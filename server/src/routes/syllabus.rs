//! Syllabus Routes
//!
//! Versioned curriculum documents. Uploading a current syllabus
//! demotes the previous one for that subject; view and download
//! counters are bumped through explicit actions so the client can
//! count reads without re-fetching.

use std::collections::HashMap;

use axum::extract::{Multipart, Path, Query, State};
use axum::http::{StatusCode, Uri};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::domain::validation::validate_document_upload;
use crate::domain::{DomainError, Syllabus};
use crate::error::{ApiError, ApiResult};
use crate::extract::AuthUser;
use crate::media;
use crate::pagination::{self, Page};
use crate::routes::{detail_404, multipart_err, parse_opt, target};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/syllabus/", get(list).post(create))
        .route("/api/syllabus/by_subject/", get(by_subject))
        .route("/api/syllabus/{id}/", get(detail))
        .route("/api/syllabus/{id}/download/", get(download))
        .route("/api/syllabus/{id}/increment_view/", post(increment_view))
        .route("/api/syllabus/{id}/increment_download/", post(increment_download))
}

/// Active syllabi, paginated; optionally narrowed to one subject
async fn list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
    uri: Uri,
) -> ApiResult<Json<Page<Syllabus>>> {
    let page = pagination::page_param(&params)?;
    let subject = parse_opt(&params, "subject")?;

    let syllabi = state.syllabus.list(subject).await?;
    Ok(Json(pagination::paginate(syllabi, page, target(&uri))?))
}

/// Single syllabus by id
async fn detail(State(state): State<AppState>, Path(id): Path<u32>) -> ApiResult<Json<Syllabus>> {
    let syllabus = state.syllabus.find_by_id(id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(syllabus))
}

/// All active syllabi of one subject, current first
async fn by_subject(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<Vec<Syllabus>>> {
    let raw = params
        .get("subject_id")
        .ok_or_else(|| ApiError::BadRequest("subject_id is required".into()))?;
    let subject_id: u32 = raw
        .parse()
        .map_err(|_| ApiError::BadRequest("subject_id must be a valid integer".into()))?;

    if !state.subjects.exists(subject_id).await? {
        return Err(ApiError::MissingResource(format!(
            "Subject with id {subject_id} does not exist"
        )));
    }

    let syllabi = state.syllabus.list(Some(subject_id)).await?;
    if syllabi.is_empty() {
        return Err(ApiError::MissingResource(
            "No syllabi available for this subject".into(),
        ));
    }
    Ok(Json(syllabi))
}

/// Upload a syllabus version for a subject
async fn create(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    mut multipart: Multipart,
) -> ApiResult<(StatusCode, Json<Syllabus>)> {
    let mut subject = None;
    let mut version = None;
    let mut description = String::new();
    let mut is_current = true;
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_err)? {
        match field.name().unwrap_or_default() {
            "subject" => subject = Some(field.text().await.map_err(multipart_err)?),
            "version" => version = Some(field.text().await.map_err(multipart_err)?),
            "description" => description = field.text().await.map_err(multipart_err)?,
            "is_current" => is_current = field.text().await.map_err(multipart_err)? != "false",
            "file" => {
                let filename = field.file_name().unwrap_or("syllabus.pdf").to_string();
                let bytes = field.bytes().await.map_err(multipart_err)?;
                file = Some((filename, bytes.to_vec()));
            }
            _ => {}
        }
    }

    let subject: u32 = subject
        .ok_or_else(|| ApiError::field("subject", "This field is required."))?
        .parse()
        .map_err(|_| ApiError::field("subject", "A valid integer is required."))?;
    let version = version.ok_or_else(|| ApiError::field("version", "This field is required."))?;
    let (filename, bytes) = file.ok_or_else(|| ApiError::field("file", "No file was submitted."))?;

    if !state.subjects.exists(subject).await? {
        return Err(ApiError::field(
            "subject",
            &format!("Invalid pk \"{subject}\" - object does not exist."),
        ));
    }
    if let Err(DomainError::InvalidInput(msg)) = validate_document_upload(&filename, bytes.len()) {
        return Err(ApiError::field("file", &msg));
    }

    let rel_path =
        media::save_document(&state.config.media_root, "syllabus", &filename, &bytes).await?;
    let now = chrono::Utc::now();
    let syllabus = Syllabus {
        id: 0,
        subject,
        subject_name: String::new(),
        file_url: Some(format!("/media/{rel_path}")),
        version,
        is_current,
        is_active: true,
        description,
        uploaded_by: Some(user.id),
        upload_date: now,
        last_updated: now,
        view_count: 0,
        download_count: 0,
    };

    let created = state.syllabus.create(&syllabus).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Hand back the file URL for client-side download
async fn download(State(state): State<AppState>, Path(id): Path<u32>) -> ApiResult<Json<Value>> {
    let syllabus = state.syllabus.find_by_id(id).await?.ok_or(ApiError::NotFound)?;
    match syllabus.file_url {
        Some(url) => Ok(Json(json!({ "url": url }))),
        None => Err(ApiError::MissingResource("No file available".into())),
    }
}

/// Count a page view
async fn increment_view(State(state): State<AppState>, Path(id): Path<u32>) -> ApiResult<Json<Value>> {
    state.syllabus.increment_view(id).await.map_err(detail_404)?;
    Ok(Json(json!({ "status": "view counted" })))
}

/// Count a download
async fn increment_download(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> ApiResult<Json<Value>> {
    state.syllabus.increment_download(id).await.map_err(detail_404)?;
    Ok(Json(json!({ "status": "download counted" })))
}
