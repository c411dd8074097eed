//! Media storage
//!
//! Uploaded documents live under the media root in per-category,
//! per-month directories (`notes/2025/08/<uuid>-file.pdf`). The stored
//! relative path doubles as the public URL under `/media/`.

use std::path::{Component, Path, PathBuf};

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use percent_encoding::{percent_decode_str, utf8_percent_encode, NON_ALPHANUMERIC};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Stores an uploaded document and returns its media-relative path.
pub async fn save_document(
    media_root: &Path,
    category: &str,
    original_name: &str,
    bytes: &[u8],
) -> ApiResult<String> {
    let rel_dir = format!("{}/{}", category, Utc::now().format("%Y/%m"));
    let dir = media_root.join(&rel_dir);
    tokio::fs::create_dir_all(&dir).await?;

    let name = format!("{}-{}", Uuid::new_v4(), sanitize_filename(original_name));
    tokio::fs::write(dir.join(&name), bytes).await?;
    Ok(format!("{rel_dir}/{name}"))
}

/// Serves `/media/{*path}` with a guessed content type.
pub async fn serve(
    State(state): State<AppState>,
    axum::extract::Path(path): axum::extract::Path<String>,
) -> Response {
    let decoded = percent_decode_str(&path).decode_utf8_lossy().to_string();
    let Some(full) = resolve(&state.config.media_root, &decoded) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    match tokio::fs::read(&full).await {
        Ok(content) => {
            let mime = mime_guess::from_path(&full).first_or_octet_stream();
            (
                [(header::CONTENT_TYPE, mime.as_ref().to_string())],
                Body::from(content),
            )
                .into_response()
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            StatusCode::NOT_FOUND.into_response()
        }
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

/// Reads a stored document and wraps it as an attachment download.
pub async fn attachment(media_root: &Path, rel_path: &str) -> ApiResult<Response> {
    let full = resolve(media_root, rel_path).ok_or(ApiError::NotFound)?;
    let content = tokio::fs::read(&full).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ApiError::NotFound
        } else {
            ApiError::Io(e)
        }
    })?;

    let filename = rel_path.rsplit('/').next().unwrap_or("download");
    let mime = mime_guess::from_path(&full).first_or_octet_stream();
    let disposition = format!(
        "attachment; filename*=UTF-8''{}",
        utf8_percent_encode(filename, NON_ALPHANUMERIC)
    );
    Ok((
        [
            (header::CONTENT_TYPE, mime.as_ref().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        Body::from(content),
    )
        .into_response())
}

/// Joins a media-relative path to the root, rejecting traversal.
fn resolve(media_root: &Path, rel: &str) -> Option<PathBuf> {
    let rel = Path::new(rel);
    if rel
        .components()
        .any(|c| !matches!(c, Component::Normal(_)))
    {
        return None;
    }
    Some(media_root.join(rel))
}

fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("notes final.pdf"), "notes_final.pdf");
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename(""), "file");
    }

    #[test]
    fn test_resolve_rejects_traversal() {
        let root = Path::new("/srv/media");
        assert!(resolve(root, "notes/2025/08/a.pdf").is_some());
        assert!(resolve(root, "../secrets.txt").is_none());
        assert!(resolve(root, "notes/../../x").is_none());
    }

    #[tokio::test]
    async fn test_save_document_places_file_under_category() {
        let dir = tempfile::tempdir().unwrap();
        let rel = save_document(dir.path(), "notes", "week 1.pdf", b"%PDF-1.4")
            .await
            .unwrap();
        assert!(rel.starts_with("notes/"));
        assert!(rel.ends_with("-week_1.pdf"));
        let stored = tokio::fs::read(dir.path().join(&rel)).await.unwrap();
        assert_eq!(stored, b"%PDF-1.4");
    }
}
