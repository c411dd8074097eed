//! REST API Client
//!
//! Thin reqwest wrapper over the backend. Requests attach the stored
//! bearer token when one exists; responses are decoded as JSON and
//! failures collapse into the five user-facing categories. A 401 on an
//! authenticated call clears the stored tokens and sends the browser to
//! the login route; nothing is retried automatically.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::models::{
    College, Comment, Event, Paginated, Program, ProgramSubjects, QuestionPaper, SearchResults,
    SubTask, Subject, Syllabus, Todo, TokenPair, User,
};
use crate::session;

/// Backend origin, overridable at build time
const API_BASE: &str = match option_env!("STUDYHALL_API_URL") {
    Some(url) => url,
    None => "http://127.0.0.1:8000",
};

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Network error. Check your connection and try again.")]
    Network,
    /// Tokens were cleared and the browser was sent to the login route
    #[error("Your session has expired. Please log in again.")]
    Unauthorized,
    #[error("You do not have permission to perform this action.")]
    Permission,
    #[error("The requested resource was not found.")]
    NotFound,
    #[error("Server error. Please try again later.")]
    Server,
    /// 400s and anything else, carrying the server's message when present
    #[error("{0}")]
    Validation(String),
}

/// Map a non-success status and body to an error category. The body's
/// own message is surfaced for validation failures: `{"detail"}` and
/// `{"error"}` strings directly, field maps as "field: first message".
fn classify(status: u16, body: &str) -> ApiError {
    match status {
        403 => ApiError::Permission,
        404 => ApiError::NotFound,
        500..=599 => ApiError::Server,
        _ => ApiError::Validation(extract_message(body).unwrap_or_else(|| {
            format!("Request failed with status {status}")
        })),
    }
}

fn extract_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let obj = value.as_object()?;
    for key in ["detail", "error", "message"] {
        if let Some(text) = obj.get(key).and_then(|v| v.as_str()) {
            return Some(text.to_string());
        }
    }
    // Field map: {"email": ["Enter a valid email address."]}
    obj.iter().find_map(|(field, messages)| {
        let first = messages.as_array()?.first()?.as_str()?;
        Some(format!("{field}: {first}"))
    })
}

fn url(endpoint: &str) -> String {
    format!("{API_BASE}{endpoint}")
}

/// Absolute URL for a media path the API returned
pub fn media_url(path: &str) -> String {
    if path.starts_with("http") {
        path.to_string()
    } else {
        format!("{API_BASE}{path}")
    }
}

/// Send a request and apply the shared status handling. A 401 clears
/// the session only when a token was actually attached; a login
/// attempt with bad credentials stays a plain validation error.
async fn send(
    method: Method,
    endpoint: &str,
    body: Option<&impl Serialize>,
) -> ApiResult<Response> {
    let mut req = Client::new().request(method, url(endpoint));
    let had_token = session::access_token().is_some();
    if let Some(token) = session::access_token() {
        req = req.header("Authorization", format!("Bearer {token}"));
    }
    if let Some(body) = body {
        req = req.json(body);
    }

    let response = req.send().await.map_err(|_| ApiError::Network)?;
    let status = response.status();

    if status == StatusCode::UNAUTHORIZED && had_token {
        session::clear_tokens();
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href("/login");
        }
        return Err(ApiError::Unauthorized);
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(classify(status.as_u16(), &body));
    }

    Ok(response)
}

async fn request<T: DeserializeOwned>(
    method: Method,
    endpoint: &str,
    body: Option<&impl Serialize>,
) -> ApiResult<T> {
    let response = send(method, endpoint, body).await?;
    response.json().await.map_err(|_| ApiError::Network)
}

async fn get<T: DeserializeOwned>(endpoint: &str) -> ApiResult<T> {
    request(Method::GET, endpoint, None::<&()>).await
}

async fn post<T: DeserializeOwned, B: Serialize>(endpoint: &str, body: &B) -> ApiResult<T> {
    request(Method::POST, endpoint, Some(body)).await
}

async fn put<T: DeserializeOwned, B: Serialize>(endpoint: &str, body: &B) -> ApiResult<T> {
    request(Method::PUT, endpoint, Some(body)).await
}

async fn delete(endpoint: &str) -> ApiResult<()> {
    send(Method::DELETE, endpoint, None::<&()>).await?;
    Ok(())
}

fn encode(value: &str) -> String {
    utf8_percent_encode(value, NON_ALPHANUMERIC).to_string()
}

// ========================
// Auth
// ========================

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

pub async fn obtain_token(email: &str, password: &str) -> ApiResult<TokenPair> {
    post("/api/users/token/", &Credentials { email, password }).await
}

#[derive(Serialize)]
struct RefreshForm<'a> {
    refresh: &'a str,
}

/// Exchange the stored refresh token for a fresh pair. The old refresh
/// token is revoked server-side on use.
pub async fn refresh_session() -> ApiResult<TokenPair> {
    let refresh = session::refresh_token().ok_or(ApiError::Unauthorized)?;
    post("/api/users/token/refresh/", &RefreshForm { refresh: &refresh }).await
}

#[derive(Serialize)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

pub async fn register(form: &RegisterForm) -> ApiResult<serde_json::Value> {
    post("/api/users/register/", form).await
}

#[derive(Serialize)]
struct OtpForm<'a> {
    email: &'a str,
    otp: &'a str,
}

pub async fn verify_otp(email: &str, otp: &str) -> ApiResult<TokenPair> {
    post("/api/users/verify-otp/", &OtpForm { email, otp }).await
}

#[derive(Serialize)]
struct EmailForm<'a> {
    email: &'a str,
}

pub async fn resend_otp(email: &str) -> ApiResult<serde_json::Value> {
    post("/api/users/resend-otp/", &EmailForm { email }).await
}

pub async fn profile() -> ApiResult<User> {
    get("/api/users/profile/").await
}

pub async fn update_profile(patch: &serde_json::Value) -> ApiResult<User> {
    put("/api/users/profile/update/", patch).await
}

#[derive(Serialize)]
pub struct PasswordChange {
    pub old_password: String,
    pub new_password: String,
}

pub async fn change_password(change: &PasswordChange) -> ApiResult<serde_json::Value> {
    post("/api/users/change-password/", change).await
}

// ========================
// Catalogue
// ========================

pub async fn list_programs() -> ApiResult<Paginated<Program>> {
    get("/api/programs/").await
}

pub async fn program_subjects(program_id: u32) -> ApiResult<ProgramSubjects> {
    get(&format!("/api/programs/{program_id}/subjects/")).await
}

pub async fn list_subjects(program: u32, semester: u8) -> ApiResult<Paginated<Subject>> {
    get(&format!("/api/subjects/?program={program}&semester={semester}")).await
}

pub async fn list_notes(subject: u32, semester: u8, page: usize) -> ApiResult<Paginated<crate::models::Note>> {
    get(&format!("/api/notes/?subject={subject}&semester={semester}&page={page}")).await
}

pub async fn syllabus_by_subject(subject_id: u32) -> ApiResult<Vec<Syllabus>> {
    get(&format!("/api/syllabus/by_subject/?subject_id={subject_id}")).await
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct DownloadUrl {
    pub url: String,
}

pub async fn syllabus_download_url(id: u32) -> ApiResult<DownloadUrl> {
    get(&format!("/api/syllabus/{id}/download/")).await
}

pub async fn syllabus_increment_view(id: u32) -> ApiResult<serde_json::Value> {
    post(&format!("/api/syllabus/{id}/increment_view/"), &()).await
}

pub async fn syllabus_increment_download(id: u32) -> ApiResult<serde_json::Value> {
    post(&format!("/api/syllabus/{id}/increment_download/"), &()).await
}

pub async fn papers_by_subject(subject_id: u32) -> ApiResult<Vec<QuestionPaper>> {
    get(&format!("/api/question-papers/by-subject/?subject_id={subject_id}")).await
}

// ========================
// Colleges, events, search
// ========================

pub async fn list_colleges(search: &str, page: usize) -> ApiResult<Paginated<College>> {
    let mut endpoint = format!("/api/colleges/?page={page}");
    if !search.is_empty() {
        endpoint.push_str(&format!("&search={}", encode(search)));
    }
    get(&endpoint).await
}

pub async fn college_detail(id: u32) -> ApiResult<College> {
    get(&format!("/api/colleges/{id}/")).await
}

pub async fn list_events(event_type: Option<&str>) -> ApiResult<Vec<Event>> {
    match event_type {
        Some(kind) => get(&format!("/api/events/?type={}", encode(kind))).await,
        None => get("/api/events/?upcoming=true").await,
    }
}

pub async fn search(query: &str) -> ApiResult<SearchResults> {
    get(&format!("/api/search/?q={}", encode(query))).await
}

// ========================
// Todos
// ========================

pub async fn list_todos() -> ApiResult<Vec<Todo>> {
    get("/api/todos/").await
}

pub async fn todo_detail(id: u32) -> ApiResult<Todo> {
    get(&format!("/api/todos/{id}/")).await
}

#[derive(Serialize)]
pub struct TodoForm {
    pub title: String,
    pub description: String,
    pub priority: String,
    pub category: String,
}

pub async fn create_todo(form: &TodoForm) -> ApiResult<Todo> {
    post("/api/todos/", form).await
}

pub async fn update_todo(id: u32, todo: &serde_json::Value) -> ApiResult<Todo> {
    put(&format!("/api/todos/{id}/"), todo).await
}

pub async fn delete_todo(id: u32) -> ApiResult<()> {
    delete(&format!("/api/todos/{id}/")).await
}

#[derive(Serialize)]
struct TitleForm<'a> {
    title: &'a str,
}

/// The action endpoints answer with the created piece only, so the
/// subtask/comment helpers refetch the todo to hand back a full row.
pub async fn add_subtask(todo_id: u32, title: &str) -> ApiResult<Todo> {
    let _: SubTask =
        post(&format!("/api/todos/{todo_id}/add_subtask/"), &TitleForm { title }).await?;
    todo_detail(todo_id).await
}

#[derive(Serialize)]
struct SubtaskIdForm {
    subtask_id: u32,
}

pub async fn toggle_subtask(todo_id: u32, subtask_id: u32) -> ApiResult<Todo> {
    let _: SubTask =
        post(&format!("/api/todos/{todo_id}/toggle_subtask/"), &SubtaskIdForm { subtask_id })
            .await?;
    todo_detail(todo_id).await
}

#[derive(Serialize)]
struct ContentForm<'a> {
    content: &'a str,
}

pub async fn add_comment(todo_id: u32, content: &str) -> ApiResult<Todo> {
    let _: Comment =
        post(&format!("/api/todos/{todo_id}/add_comment/"), &ContentForm { content }).await?;
    todo_detail(todo_id).await
}

pub async fn delete_comment(todo_id: u32, comment_id: u32) -> ApiResult<()> {
    delete(&format!("/api/todos/{todo_id}/comments/{comment_id}/")).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_statuses() {
        assert_eq!(classify(403, "{}"), ApiError::Permission);
        assert_eq!(classify(404, "{}"), ApiError::NotFound);
        assert_eq!(classify(500, ""), ApiError::Server);
        assert_eq!(classify(503, "busy"), ApiError::Server);
    }

    #[test]
    fn test_validation_surfaces_server_message() {
        let err = classify(400, r#"{"error": "subject_id query parameter is required"}"#);
        assert_eq!(
            err,
            ApiError::Validation("subject_id query parameter is required".to_string())
        );

        let err = classify(401, r#"{"detail": "No active account found with the given credentials"}"#);
        assert_eq!(
            err,
            ApiError::Validation("No active account found with the given credentials".to_string())
        );
    }

    #[test]
    fn test_validation_field_map_and_fallback() {
        let err = classify(400, r#"{"email": ["Enter a valid email address."]}"#);
        assert_eq!(
            err,
            ApiError::Validation("email: Enter a valid email address.".to_string())
        );

        let err = classify(418, "not json");
        assert_eq!(err, ApiError::Validation("Request failed with status 418".to_string()));
    }

    #[test]
    fn test_media_url_prefixes_relative_paths() {
        assert!(media_url("/media/notes/a.pdf").ends_with("/media/notes/a.pdf"));
        assert_eq!(media_url("https://cdn.example.com/a.pdf"), "https://cdn.example.com/a.pdf");
    }
}
