//! Cross-Resource Search
//!
//! One query against notes, subjects and colleges at once, top five of
//! each, for the navbar search dropdown.

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::Json;
use serde_json::{json, Value};

use crate::error::ApiResult;
use crate::repository::SearchableRepository;
use crate::state::AppState;

const GROUP_LIMIT: usize = 5;

pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<Value>> {
    let query = params.get("q").map(String::as_str).unwrap_or("").trim().to_string();
    if query.is_empty() {
        return Ok(Json(json!({
            "query": "",
            "notes": [],
            "subjects": [],
            "colleges": [],
        })));
    }

    let mut notes = state.notes.search(&query).await?;
    notes.truncate(GROUP_LIMIT);
    let mut subjects = state.subjects.search(&query).await?;
    subjects.truncate(GROUP_LIMIT);
    let mut colleges = state.colleges.search(&query).await?;
    colleges.truncate(GROUP_LIMIT);

    Ok(Json(json!({
        "query": query,
        "notes": notes,
        "subjects": subjects,
        "colleges": colleges,
    })))
}
