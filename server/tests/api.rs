//! End-to-end API tests driven through the router with `oneshot`,
//! asserting the exact wire bodies the web client depends on.

use std::path::Path;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::Utc;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use studyhall_server::config::Config;
use studyhall_server::domain::{
    Note, Program, Subject, Syllabus,
};
use studyhall_server::repository::{open_db, Repository};
use studyhall_server::routes;
use studyhall_server::state::AppState;

struct TestApp {
    router: Router,
    state: AppState,
    _media: tempfile::TempDir,
}

fn test_app() -> TestApp {
    let media = tempfile::tempdir().expect("media dir");
    let config = Config {
        port: 0,
        database_path: Path::new(":memory:").to_path_buf(),
        media_root: media.path().to_path_buf(),
        debug: true,
        frontend_origin: "http://localhost:5173".to_string(),
    };
    let conn = open_db(Path::new(":memory:")).expect("test db");
    let state = AppState::new(config, conn);
    let router = routes::app_router().with_state(state.clone());
    TestApp { router, state, _media: media }
}

async fn send(app: &TestApp, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.router.clone().oneshot(request).await.expect("request");
    let status = response.status();
    let bytes = response.into_body().collect().await.expect("body").to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).expect("request")
}

fn get_auth(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .expect("request")
}

fn json_request(method: Method, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).expect("request")
}

/// For responses that are not JSON (stored files, attachments)
async fn send_raw(
    app: &TestApp,
    request: Request<Body>,
) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let response = app.router.clone().oneshot(request).await.expect("request");
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.expect("body").to_bytes();
    (status, headers, bytes.to_vec())
}

const BOUNDARY: &str = "x-test-boundary-7f2d9c";

fn multipart_request(
    uri: &str,
    token: &str,
    fields: &[(&str, &str)],
    file: Option<(&str, &[u8])>,
) -> Request<Body> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((filename, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; \
                 filename=\"{filename}\"\r\nContent-Type: application/pdf\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body))
        .expect("request")
}

/// Run the whole OTP registration flow, returning an access token
async fn register_user(app: &TestApp, email: &str, username: &str) -> String {
    let (status, body) = send(
        app,
        json_request(
            Method::POST,
            "/api/users/register/",
            None,
            json!({
                "username": username,
                "email": email,
                "password": "S3curePass!word",
                "confirm_password": "S3curePass!word",
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "register failed: {body}");
    let otp = body["debug_otp"].as_str().expect("debug otp").to_string();

    let (status, body) = send(
        app,
        json_request(
            Method::POST,
            "/api/users/verify-otp/",
            None,
            json!({ "email": email, "otp": otp }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "verify failed: {body}");
    body["access"].as_str().expect("access token").to_string()
}

fn make_subject(program: u32, semester: u8, code: &str) -> Subject {
    Subject {
        id: 0,
        code: code.to_string(),
        name: format!("Subject {code}"),
        program,
        program_name: String::new(),
        semester,
        credit_hours: 3,
        is_active: true,
    }
}

fn make_note(subject: u32, semester: u8, title: &str) -> Note {
    Note {
        id: 0,
        title: title.to_string(),
        subject,
        subject_name: String::new(),
        semester,
        description: String::new(),
        file_url: None,
        upload_date: Utc::now(),
        uploaded_by: None,
        uploaded_by_name: None,
        is_verified: false,
    }
}

async fn seed_subject(app: &TestApp, code: &str) -> Subject {
    let program = app
        .state
        .programs
        .create(&Program::new(0, "BCA".to_string(), format!("bca-{code}")))
        .await
        .expect("program");
    app.state
        .subjects
        .create(&make_subject(program.id, 1, code))
        .await
        .expect("subject")
}

// ========================
// Health and root
// ========================

#[tokio::test]
async fn test_health_check() {
    let app = test_app();
    let (status, body) = send(&app, get("/health-check/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = send(&app, get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["endpoints"]["notes"], "/api/notes/");
}

// ========================
// Auth flow
// ========================

#[tokio::test]
async fn test_registration_and_login() {
    let app = test_app();
    register_user(&app, "alice@example.com", "alice").await;

    // Wrong password answers the DRF credentials string
    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/users/token/",
            None,
            json!({ "email": "alice@example.com", "password": "wrong" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "No active account found with the given credentials");

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/users/token/",
            None,
            json!({ "email": "alice@example.com", "password": "S3curePass!word" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    let access = body["access"].as_str().expect("access").to_string();
    let refresh = body["refresh"].as_str().expect("refresh").to_string();

    let (status, body) = send(&app, get_auth("/api/users/profile/", &access)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "alice@example.com");

    // Refresh rotates: the old refresh token dies with its first use
    let (status, _) = send(
        &app,
        json_request(Method::POST, "/api/users/token/refresh/", None, json!({ "refresh": refresh })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = send(
        &app,
        json_request(Method::POST, "/api/users/token/refresh/", None, json!({ "refresh": refresh })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "Given token not valid for any token type");
}

#[tokio::test]
async fn test_register_validation_errors() {
    let app = test_app();
    register_user(&app, "alice@example.com", "alice").await;

    // Duplicate email comes back as a per-field message map
    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/users/register/",
            None,
            json!({
                "username": "alice2",
                "email": "alice@example.com",
                "password": "S3curePass!word",
                "confirm_password": "S3curePass!word",
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["email"][0].as_str().expect("email error").contains("already exists"));

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/users/register/",
            None,
            json!({
                "username": "bob",
                "email": "bob@example.com",
                "password": "S3curePass!word",
                "confirm_password": "different",
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["password"][0], "Password fields didn't match.");
}

#[tokio::test]
async fn test_wrong_otp_rejected() {
    let app = test_app();
    let (status, _) = send(
        &app,
        json_request(
            Method::POST,
            "/api/users/register/",
            None,
            json!({
                "username": "carol",
                "email": "carol@example.com",
                "password": "S3curePass!word",
                "confirm_password": "S3curePass!word",
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/users/verify-otp/",
            None,
            json!({ "email": "carol@example.com", "otp": "000000" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Invalid verification code. Please try again.");
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let app = test_app();

    let (status, body) = send(&app, get("/api/users/profile/")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "Authentication credentials were not provided.");

    let (status, body) = send(&app, get_auth("/api/todos/", "made-up-token")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "Given token not valid for any token type");
}

#[tokio::test]
async fn test_profile_update() {
    let app = test_app();
    let token = register_user(&app, "alice@example.com", "alice").await;

    let (status, body) = send(
        &app,
        json_request(
            Method::PATCH,
            "/api/users/profile/update/",
            Some(&token),
            json!({ "first_name": "Alice", "semester": 3 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "update failed: {body}");
    assert_eq!(body["first_name"], "Alice");
    assert_eq!(body["semester"], 3);
    // Untouched fields survive the patch
    assert_eq!(body["email"], "alice@example.com");
}

// ========================
// Pagination
// ========================

#[tokio::test]
async fn test_notes_pagination_envelope() {
    let app = test_app();
    let subject = seed_subject(&app, "CSC101").await;
    for i in 0..12 {
        app.state
            .notes
            .create(&make_note(subject.id, 1, &format!("Note {i}")))
            .await
            .expect("note");
    }

    let (status, body) = send(&app, get("/api/notes/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 12);
    assert_eq!(body["results"].as_array().expect("results").len(), 10);
    assert_eq!(body["next"], "/api/notes/?page=2");
    assert_eq!(body["previous"], Value::Null);

    let (status, body) = send(&app, get("/api/notes/?page=2")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results"].as_array().expect("results").len(), 2);
    assert_eq!(body["next"], Value::Null);
    // Back-link to page one drops the parameter
    assert_eq!(body["previous"], "/api/notes/");

    let (status, body) = send(&app, get("/api/notes/?page=99")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Invalid page.");

    let (status, body) = send(&app, get("/api/notes/?page=junk")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Invalid page.");
}

#[tokio::test]
async fn test_notes_filter_validation() {
    let app = test_app();
    let (status, body) = send(&app, get("/api/notes/?subject=abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "subject must be a valid integer");
}

// ========================
// Programs and subjects
// ========================

#[tokio::test]
async fn test_program_subjects_grouped() {
    let app = test_app();
    let program = app
        .state
        .programs
        .create(&Program::new(0, "BCA".to_string(), "bca".to_string()))
        .await
        .expect("program");
    app.state.subjects.create(&make_subject(program.id, 1, "CSC101")).await.expect("subject");
    app.state.subjects.create(&make_subject(program.id, 2, "CSC201")).await.expect("subject");

    let (status, body) = send(&app, get(&format!("/api/programs/{}/subjects/", program.id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["program"]["name"], "BCA");
    let semesters = body["semesters"].as_array().expect("semesters");
    assert_eq!(semesters.len(), 2);
    assert_eq!(semesters[0]["semester"], 1);
    assert_eq!(semesters[0]["subjects"][0]["code"], "CSC101");

    let (status, body) = send(&app, get("/api/programs/999/subjects/")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Not found.");
}

// ========================
// Syllabus by subject
// ========================

#[tokio::test]
async fn test_syllabus_by_subject() {
    let app = test_app();

    let (status, body) = send(&app, get("/api/syllabus/by_subject/")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "subject_id is required");

    let (status, body) = send(&app, get("/api/syllabus/by_subject/?subject_id=999")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Subject with id 999 does not exist");

    let subject = seed_subject(&app, "CSC101").await;
    let uri = format!("/api/syllabus/by_subject/?subject_id={}", subject.id);

    // A subject without syllabi is a 404, not an empty list
    let (status, body) = send(&app, get(&uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "No syllabi available for this subject");

    app.state
        .syllabus
        .create(&Syllabus {
            id: 0,
            subject: subject.id,
            subject_name: String::new(),
            file_url: None,
            version: "2023".to_string(),
            is_current: true,
            is_active: true,
            description: String::new(),
            uploaded_by: None,
            upload_date: Utc::now(),
            last_updated: Utc::now(),
            view_count: 0,
            download_count: 0,
        })
        .await
        .expect("syllabus");

    let (status, body) = send(&app, get(&uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().expect("list").len(), 1);
    assert_eq!(body[0]["version"], "2023");
}

#[tokio::test]
async fn test_question_papers_by_subject_validation() {
    let app = test_app();
    let (status, body) = send(&app, get("/api/question-papers/by-subject/?subject_id=junk")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "subject_id must be a valid integer");
}

// ========================
// Uploads and media
// ========================

#[tokio::test]
async fn test_note_upload_round_trip() {
    let app = test_app();
    let token = register_user(&app, "alice@example.com", "alice").await;
    let subject = seed_subject(&app, "CSC101").await;
    let pdf: &[u8] = b"%PDF-1.4 lecture one";

    let (status, body) = send(
        &app,
        multipart_request(
            "/api/notes/",
            &token,
            &[
                ("title", "Lecture 1"),
                ("subject", &subject.id.to_string()),
                ("semester", "1"),
            ],
            Some(("lecture.pdf", pdf)),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "upload failed: {body}");
    let id = body["id"].as_u64().expect("id");
    let file_url = body["file_url"].as_str().expect("file url").to_string();
    assert!(file_url.starts_with("/media/notes/"), "unexpected url: {file_url}");
    assert!(file_url.ends_with(".pdf"));

    // The stored file is reachable under /media/
    let (status, headers, bytes) = send_raw(&app, get(&file_url)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "application/pdf");
    assert_eq!(bytes, pdf);

    // The download endpoint streams the same bytes as an attachment
    let (status, headers, bytes) =
        send_raw(&app, get(&format!("/api/notes/{id}/download/"))).await;
    assert_eq!(status, StatusCode::OK);
    let disposition = headers[header::CONTENT_DISPOSITION].to_str().expect("disposition");
    assert!(disposition.starts_with("attachment"), "got: {disposition}");
    assert_eq!(bytes, pdf);
}

#[tokio::test]
async fn test_note_upload_accepts_multi_megabyte_pdf() {
    let app = test_app();
    let token = register_user(&app, "alice@example.com", "alice").await;
    let subject = seed_subject(&app, "CSC101").await;

    // 3 MB sits between axum's stock 2 MB body cap and the 5 MB rule
    let pdf = vec![0x25u8; 3 * 1024 * 1024];
    let (status, body) = send(
        &app,
        multipart_request(
            "/api/notes/",
            &token,
            &[
                ("title", "Full course pack"),
                ("subject", &subject.id.to_string()),
                ("semester", "1"),
            ],
            Some(("pack.pdf", &pdf)),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "upload failed: {body}");
}

#[tokio::test]
async fn test_note_upload_rejects_non_pdf() {
    let app = test_app();
    let token = register_user(&app, "alice@example.com", "alice").await;
    let subject = seed_subject(&app, "CSC101").await;

    let (status, body) = send(
        &app,
        multipart_request(
            "/api/notes/",
            &token,
            &[
                ("title", "Lecture 1"),
                ("subject", &subject.id.to_string()),
                ("semester", "1"),
            ],
            Some(("lecture.docx", b"not a pdf")),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["file"][0], "Only PDF files are allowed");
}

#[tokio::test]
async fn test_note_upload_rejects_oversize_file() {
    let app = test_app();
    let token = register_user(&app, "alice@example.com", "alice").await;
    let subject = seed_subject(&app, "CSC101").await;

    let pdf = vec![0x25u8; 5 * 1024 * 1024 + 1];
    let (status, body) = send(
        &app,
        multipart_request(
            "/api/notes/",
            &token,
            &[
                ("title", "Too big"),
                ("subject", &subject.id.to_string()),
                ("semester", "1"),
            ],
            Some(("big.pdf", &pdf)),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["file"][0], "File size must not exceed 5 MB");
}

// ========================
// Search
// ========================

#[tokio::test]
async fn test_search_groups() {
    let app = test_app();
    let subject = seed_subject(&app, "CSC101").await;
    app.state
        .notes
        .create(&make_note(subject.id, 1, "Pointers and arrays"))
        .await
        .expect("note");

    let (status, body) = send(&app, get("/api/search/?q=pointers")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["query"], "pointers");
    assert_eq!(body["notes"].as_array().expect("notes").len(), 1);
    assert!(body["subjects"].as_array().expect("subjects").is_empty());
    assert!(body["colleges"].as_array().expect("colleges").is_empty());

    // Blank queries short-circuit to empty groups
    let (status, body) = send(&app, get("/api/search/?q=")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["query"], "");
    assert!(body["notes"].as_array().expect("notes").is_empty());
}

// ========================
// Todos
// ========================

#[tokio::test]
async fn test_todo_crud_over_http() {
    let app = test_app();
    let token = register_user(&app, "alice@example.com", "alice").await;

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/todos/",
            Some(&token),
            json!({ "title": "Revise unit 3", "priority": "high" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {body}");
    let id = body["id"].as_u64().expect("id");
    assert_eq!(body["isCompleted"], false);
    assert_eq!(body["priority"], "high");
    assert!(body.get("owner").is_none(), "owner must not leak onto the wire");

    let (status, body) = send(
        &app,
        json_request(
            Method::PUT,
            &format!("/api/todos/{id}/"),
            Some(&token),
            json!({ "title": "Revise unit 3", "priority": "high", "isCompleted": true }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isCompleted"], true);

    let (status, body) = send(&app, get_auth("/api/todos/", &token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().expect("list").len(), 1);

    let (status, _) = send(
        &app,
        json_request(Method::DELETE, &format!("/api/todos/{id}/"), Some(&token), json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, get_auth(&format!("/api/todos/{id}/"), &token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Not found.");
}

#[tokio::test]
async fn test_todo_invisible_to_other_users() {
    let app = test_app();
    let alice = register_user(&app, "alice@example.com", "alice").await;
    let bob = register_user(&app, "bob@example.com", "bob").await;

    let (status, body) = send(
        &app,
        json_request(Method::POST, "/api/todos/", Some(&alice), json!({ "title": "Mine" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_u64().expect("id");

    // Someone else's todo answers exactly like a missing one
    let (status, body) = send(&app, get_auth(&format!("/api/todos/{id}/"), &bob)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Not found.");

    let (status, body) = send(&app, get_auth("/api/todos/", &bob)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().expect("list").is_empty());
}

#[tokio::test]
async fn test_todo_subtasks_and_comments_over_http() {
    let app = test_app();
    let token = register_user(&app, "alice@example.com", "alice").await;

    let (_, body) = send(
        &app,
        json_request(Method::POST, "/api/todos/", Some(&token), json!({ "title": "Task" })),
    )
    .await;
    let id = body["id"].as_u64().expect("id");

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            &format!("/api/todos/{id}/add_subtask/"),
            Some(&token),
            json!({}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["title"][0], "This field is required.");

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            &format!("/api/todos/{id}/add_subtask/"),
            Some(&token),
            json!({ "title": "Step one" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let subtask_id = body["id"].as_u64().expect("subtask id");
    assert_eq!(body["is_completed"], false);

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            &format!("/api/todos/{id}/toggle_subtask/"),
            Some(&token),
            json!({ "subtask_id": subtask_id }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_completed"], true);

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            &format!("/api/todos/{id}/add_comment/"),
            Some(&token),
            json!({ "content": "Halfway there" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["content"], "Halfway there");
    assert_eq!(body["user_name"], "alice");
}
