//! Question Paper Routes
//!
//! Past exam papers, keyed by UUID. Upload needs a login; papers stay
//! PENDING until moderated. Downloading streams the PDF and bumps the
//! counter in one go.

use std::collections::HashMap;

use axum::extract::{Multipart, Path, Query, State};
use axum::http::{StatusCode, Uri};
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};

use crate::domain::validation::validate_document_upload;
use crate::domain::{DomainError, PaperStatus, QuestionPaper};
use crate::error::{ApiError, ApiResult};
use crate::extract::AuthUser;
use crate::media;
use crate::pagination::{self, Page};
use crate::routes::{multipart_err, parse_opt, target};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/question-papers/", get(list).post(create))
        .route("/api/question-papers/by-subject/", get(by_subject))
        .route("/api/question-papers/{id}/", get(detail))
        .route("/api/question-papers/{id}/download/", get(download))
}

/// Papers, paginated; filterable by subject and year
async fn list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
    uri: Uri,
) -> ApiResult<Json<Page<QuestionPaper>>> {
    let page = pagination::page_param(&params)?;
    let subject = parse_opt(&params, "subject")?;
    let year = parse_opt(&params, "year")?;

    let papers = state.papers.list(subject, year).await?;
    Ok(Json(pagination::paginate(papers, page, target(&uri))?))
}

/// Single paper by UUID
async fn detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<QuestionPaper>> {
    let paper = state.papers.find_by_id(&id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(paper))
}

/// Papers of one subject, newest year first; optionally one year only
async fn by_subject(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<Vec<QuestionPaper>>> {
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

    let year = match params.get("year") {
        None => None,
        Some(raw) => Some(
            raw.parse::<u16>()
                .map_err(|_| ApiError::BadRequest("year must be a valid integer".into()))?,
        ),
    };

    let papers = state.papers.list(Some(subject_id), year).await?;
    Ok(Json(papers))
}

/// Upload a paper: multipart form with subject, year, semester and a PDF
async fn create(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    mut multipart: Multipart,
) -> ApiResult<(StatusCode, Json<QuestionPaper>)> {
    let mut subject = None;
    let mut year = None;
    let mut semester = None;
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_err)? {
        match field.name().unwrap_or_default() {
            "subject" => subject = Some(field.text().await.map_err(multipart_err)?),
            "year" => year = Some(field.text().await.map_err(multipart_err)?),
            "semester" => semester = Some(field.text().await.map_err(multipart_err)?),
            "file" => {
                let filename = field.file_name().unwrap_or("paper.pdf").to_string();
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
    let year: u16 = year
        .ok_or_else(|| ApiError::field("year", "This field is required."))?
        .parse()
        .map_err(|_| ApiError::field("year", "A valid integer is required."))?;
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
    if let Err(DomainError::InvalidInput(msg)) = QuestionPaper::validate_year(year) {
        return Err(ApiError::field("year", &msg));
    }
    if let Err(DomainError::InvalidInput(msg)) = validate_document_upload(&filename, bytes.len()) {
        return Err(ApiError::field("file", &msg));
    }

    let rel_path =
        media::save_document(&state.config.media_root, "question_papers", &filename, &bytes).await?;
    let now = chrono::Utc::now();
    let paper = QuestionPaper {
        id: String::new(),
        subject,
        subject_name: String::new(),
        year,
        semester,
        file_url: Some(format!("/media/{rel_path}")),
        status: PaperStatus::Pending,
        uploaded_by: Some(user.id),
        created_at: now,
        updated_at: now,
        verified_date: None,
        view_count: 0,
        download_count: 0,
    };

    let created = state.papers.create(&paper).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Stream the stored PDF as an attachment and count the download
async fn download(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Response> {
    let rel_path = match state.papers.file_path(&id).await {
        Ok(Some(path)) => path,
        Ok(None) => {
            return Err(ApiError::MissingResource("No file available for download".into()))
        }
        Err(DomainError::NotFound(_)) => return Err(ApiError::NotFound),
        Err(other) => return Err(other.into()),
    };

    state.papers.increment_download(&id).await?;
    media::attachment(&state.config.media_root, &rel_path).await
}
