//! Root and Health Endpoints
//!
//! Unauthenticated probes: the API root lists the available endpoint
//! groups, the health check answers `{"status": "ok"}`.

use axum::Json;
use serde_json::{json, Value};

/// API root listing the endpoint groups
pub async fn api_root() -> Json<Value> {
    Json(json!({
        "message": "Welcome to the Studyhall API",
        "endpoints": {
            "users": "/api/users/",
            "profile": "/api/users/profile/",
            "programs": "/api/programs/",
            "subjects": "/api/subjects/",
            "notes": "/api/notes/",
            "syllabus": "/api/syllabus/",
            "question_papers": "/api/question-papers/",
            "colleges": "/api/colleges/",
            "events": "/api/events/",
            "todos": "/api/todos/",
            "search": "/api/search/",
            "token": "/api/users/token/",
            "token_refresh": "/api/users/token/refresh/",
            "health_check": "/health-check/",
        }
    }))
}

/// Liveness probe
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
