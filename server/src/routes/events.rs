//! Event Routes
//!
//! Careers-page events as a plain date-ordered list.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use crate::domain::{Event, EventType};
use crate::error::{ApiError, ApiResult};
use crate::extract::AuthUser;
use crate::repository::Repository;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/events/", get(list).post(create))
        .route("/api/events/{id}/", get(detail))
}

/// Events in date order; ?type= narrows by kind, ?upcoming=true drops past dates
async fn list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<Vec<Event>>> {
    let event_type = params.get("type").map(|t| EventType::from_str(t));
    let upcoming = params.get("upcoming").map(|v| v == "true").unwrap_or(false);

    let events = if upcoming {
        state.events.list_upcoming(event_type).await?
    } else {
        match event_type {
            Some(kind) => state.events.list_by_type(kind).await?,
            None => state.events.list().await?,
        }
    };
    Ok(Json(events))
}

/// Single event by id
async fn detail(State(state): State<AppState>, Path(id): Path<u32>) -> ApiResult<Json<Event>> {
    let event = state.events.find_by_id(id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(event))
}

#[derive(Deserialize)]
struct EventForm {
    title: String,
    date: chrono::NaiveDate,
    #[serde(default)]
    time: String,
    #[serde(default)]
    location: String,
    event_type: Option<EventType>,
    #[serde(default)]
    description: String,
    speaker: Option<String>,
    #[serde(default)]
    registration_required: bool,
}

/// Publish an event
async fn create(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
    Json(form): Json<EventForm>,
) -> ApiResult<(StatusCode, Json<Event>)> {
    let event = Event {
        id: 0,
        title: form.title,
        date: form.date,
        time: form.time,
        location: form.location,
        event_type: form.event_type.unwrap_or_default(),
        description: form.description,
        speaker: form.speaker,
        registration_required: form.registration_required,
        created_at: chrono::Utc::now(),
    };
    let created = state.events.create(&event).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
