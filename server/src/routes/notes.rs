//! Note Routes
//!
//! Listing is open; uploading takes a multipart form with a PDF and
//! needs a logged-in account. Deleting is restricted to the uploader.

use std::collections::HashMap;

use axum::extract::{Multipart, Path, Query, State};
use axum::http::{StatusCode, Uri};
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};

use crate::domain::validation::validate_document_upload;
use crate::domain::{DomainError, Note};
use crate::error::{ApiError, ApiResult};
use crate::extract::AuthUser;
use crate::media;
use crate::pagination::{self, Page};
use crate::repository::{NoteFilter, Repository};
use crate::routes::{multipart_err, parse_opt, target};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/notes/", get(list).post(create))
        .route("/api/notes/{id}/", get(detail).delete(remove))
        .route("/api/notes/{id}/download/", get(download))
}

/// Notes, paginated; filterable and orderable
async fn list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
    uri: Uri,
) -> ApiResult<Json<Page<Note>>> {
    let page = pagination::page_param(&params)?;
    let filter = NoteFilter {
        subject: parse_opt(&params, "subject")?,
        semester: parse_opt(&params, "semester")?,
        is_verified: params.get("is_verified").map(|v| v == "true"),
        search: params.get("search").cloned(),
        ordering: params.get("ordering").cloned(),
    };

    let notes = state.notes.list_filtered(&filter).await?;
    Ok(Json(pagination::paginate(notes, page, target(&uri))?))
}

/// Single note by id
async fn detail(State(state): State<AppState>, Path(id): Path<u32>) -> ApiResult<Json<Note>> {
    let note = state.notes.find_by_id(id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(note))
}

/// Upload a note: multipart form with title, subject, semester and a PDF
async fn create(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    mut multipart: Multipart,
) -> ApiResult<(StatusCode, Json<Note>)> {
    let mut title = None;
    let mut subject = None;
    let mut semester = None;
    let mut description = String::new();
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_err)? {
        match field.name().unwrap_or_default() {
            "title" => title = Some(field.text().await.map_err(multipart_err)?),
            "subject" => subject = Some(field.text().await.map_err(multipart_err)?),
            "semester" => semester = Some(field.text().await.map_err(multipart_err)?),
            "description" => description = field.text().await.map_err(multipart_err)?,
            "file" => {
                let filename = field.file_name().unwrap_or("upload.pdf").to_string();
                let bytes = field.bytes().await.map_err(multipart_err)?;
                file = Some((filename, bytes.to_vec()));
            }
            _ => {}
        }
    }

    let title = title.ok_or_else(|| ApiError::field("title", "This field is required."))?;
    let subject: u32 = subject
        .ok_or_else(|| ApiError::field("subject", "This field is required."))?
        .parse()
        .map_err(|_| ApiError::field("subject", "A valid integer is required."))?;
    let semester: u8 = semester
        .ok_or_else(|| ApiError::field("semester", "This field is required."))?
        .parse()
        .map_err(|_| ApiError::field("semester", "A valid integer is required."))?;
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

    let rel_path = media::save_document(&state.config.media_root, "notes", &filename, &bytes).await?;
    let note = Note {
        id: 0,
        title,
        subject,
        subject_name: String::new(),
        semester,
        description,
        file_url: Some(format!("/media/{rel_path}")),
        upload_date: chrono::Utc::now(),
        uploaded_by: Some(user.id),
        uploaded_by_name: None,
        is_verified: false,
    };

    let created = state.notes.create(&note).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Delete a note; only the uploader may do this
async fn remove(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<u32>,
) -> ApiResult<StatusCode> {
    let note = state.notes.find_by_id(id).await?.ok_or(ApiError::NotFound)?;
    if note.uploaded_by != Some(user.id) {
        return Err(ApiError::PermissionDenied);
    }

    state.notes.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Stream the stored PDF as an attachment
async fn download(State(state): State<AppState>, Path(id): Path<u32>) -> ApiResult<Response> {
    let rel_path = match state.notes.file_path(id).await {
        Ok(Some(path)) => path,
        Ok(None) => {
            return Err(ApiError::MissingResource("No file available for download".into()))
        }
        Err(DomainError::NotFound(_)) => return Err(ApiError::NotFound),
        Err(other) => return Err(other.into()),
    };
    media::attachment(&state.config.media_root, &rel_path).await
}
