//! Todo Routes
//!
//! Per-user task lists. Every route needs a login and only ever sees
//! the caller's own todos; someone else's id answers 404 exactly like a
//! missing one. Responses are plain arrays, not pages.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::{Comment, Priority, SubTask, Todo, User};
use crate::error::{ApiError, ApiResult};
use crate::extract::AuthUser;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/todos/", get(list).post(create))
        .route("/api/todos/{id}/", get(detail).put(update).patch(update).delete(remove))
        .route("/api/todos/{id}/add_subtask/", post(add_subtask))
        .route("/api/todos/{id}/toggle_subtask/", post(toggle_subtask))
        .route("/api/todos/{id}/subtasks/{subtask_id}/", delete(remove_subtask))
        .route("/api/todos/{id}/add_comment/", post(add_comment))
        .route("/api/todos/{id}/comments/{comment_id}/", delete(remove_comment))
}

/// The caller's todo or 404; other owners' todos are invisible
async fn owned_todo(state: &AppState, user: &User, id: u32) -> ApiResult<Todo> {
    let todo = state.todos.find_by_id(id).await?.ok_or(ApiError::NotFound)?;
    if todo.owner != Some(user.id) {
        return Err(ApiError::NotFound);
    }
    Ok(todo)
}

/// The caller's todos, newest first
async fn list(State(state): State<AppState>, AuthUser(user): AuthUser) -> ApiResult<Json<Vec<Todo>>> {
    let todos = state.todos.list_for_owner(user.id).await?;
    Ok(Json(todos))
}

/// One todo with its subtasks and comments
async fn detail(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<u32>,
) -> ApiResult<Json<Todo>> {
    let todo = owned_todo(&state, &user, id).await?;
    Ok(Json(todo))
}

#[derive(Deserialize)]
struct TodoForm {
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    priority: Priority,
    #[serde(rename = "dueDate")]
    due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    category: String,
    #[serde(rename = "isCompleted", default)]
    is_completed: bool,
}

/// Create a todo owned by the caller
async fn create(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(form): Json<TodoForm>,
) -> ApiResult<(StatusCode, Json<Todo>)> {
    let now = Utc::now();
    let todo = Todo {
        id: 0,
        title: form.title,
        description: form.description,
        priority: form.priority,
        due_date: form.due_date,
        category: form.category,
        is_completed: form.is_completed,
        created_at: now,
        last_modified: now,
        owner: Some(user.id),
        subtasks: Vec::new(),
        comments: Vec::new(),
    };

    let created = state.todos.create(&todo, user.id).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Replace a todo's fields; last_modified is refreshed server-side
async fn update(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<u32>,
    Json(form): Json<TodoForm>,
) -> ApiResult<Json<Todo>> {
    let mut todo = owned_todo(&state, &user, id).await?;
    todo.title = form.title;
    todo.description = form.description;
    todo.priority = form.priority;
    todo.due_date = form.due_date;
    todo.category = form.category;
    todo.is_completed = form.is_completed;

    let updated = state.todos.update(&todo).await?;
    Ok(Json(updated))
}

/// Delete a todo along with its subtasks and comments
async fn remove(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<u32>,
) -> ApiResult<StatusCode> {
    owned_todo(&state, &user, id).await?;
    state.todos.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
struct SubTaskForm {
    title: Option<String>,
}

/// Attach a subtask
async fn add_subtask(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<u32>,
    Json(form): Json<SubTaskForm>,
) -> ApiResult<(StatusCode, Json<SubTask>)> {
    owned_todo(&state, &user, id).await?;
    let title = form
        .title
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::field("title", "This field is required."))?;

    let subtask = state.todos.add_subtask(id, &title).await?;
    Ok((StatusCode::CREATED, Json(subtask)))
}

#[derive(Deserialize)]
struct ToggleSubtaskForm {
    subtask_id: Option<u32>,
}

/// Flip a subtask's completion flag
async fn toggle_subtask(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<u32>,
    Json(form): Json<ToggleSubtaskForm>,
) -> ApiResult<Json<SubTask>> {
    owned_todo(&state, &user, id).await?;
    let subtask_id = form
        .subtask_id
        .ok_or_else(|| ApiError::BadRequest("subtask_id is required".into()))?;

    let subtask = state
        .todos
        .toggle_subtask(id, subtask_id)
        .await?
        .ok_or_else(|| ApiError::NotFoundDetail("Subtask not found".into()))?;
    Ok(Json(subtask))
}

/// Detach a subtask
async fn remove_subtask(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path((id, subtask_id)): Path<(u32, u32)>,
) -> ApiResult<StatusCode> {
    owned_todo(&state, &user, id).await?;
    if !state.todos.delete_subtask(id, subtask_id).await? {
        return Err(ApiError::NotFoundDetail("Subtask not found".into()));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
struct CommentForm {
    content: Option<String>,
}

/// Comment on a todo
async fn add_comment(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<u32>,
    Json(form): Json<CommentForm>,
) -> ApiResult<(StatusCode, Json<Comment>)> {
    owned_todo(&state, &user, id).await?;
    let content = form
        .content
        .filter(|c| !c.is_empty())
        .ok_or_else(|| ApiError::field("content", "This field is required."))?;

    let comment = state
        .todos
        .add_comment(id, user.id, &user.display_name(), &content)
        .await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

/// Delete a comment; allowed for its author or the todo's owner
async fn remove_comment(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path((id, comment_id)): Path<(u32, u32)>,
) -> ApiResult<StatusCode> {
    let todo = owned_todo(&state, &user, id).await?;
    let comment = state
        .todos
        .find_comment(id, comment_id)
        .await?
        .ok_or_else(|| ApiError::NotFoundDetail("Comment not found".into()))?;

    if comment.user != user.id && todo.owner != Some(user.id) {
        return Err(ApiError::ForbiddenDetail(
            "Only the comment author or todo owner can delete comments".into(),
        ));
    }

    state.todos.delete_comment(id, comment_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
