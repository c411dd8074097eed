//! College Routes
//!
//! Directory of affiliated institutions. Reading is open; adding an
//! entry needs a login.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, Uri};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use crate::domain::{slugify, College, InstitutionType};
use crate::error::{ApiError, ApiResult};
use crate::extract::AuthUser;
use crate::pagination::{self, Page};
use crate::repository::Repository;
use crate::routes::target;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/colleges/", get(list).post(create))
        .route("/api/colleges/{id}/", get(detail))
}

/// Colleges by rating, paginated; ?search= matches name, location and
/// affiliation, ?featured=true narrows to featured entries
async fn list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
    uri: Uri,
) -> ApiResult<Json<Page<College>>> {
    let page = pagination::page_param(&params)?;
    let search = params.get("search").map(String::as_str);
    let featured = params.get("featured").map(|v| v == "true").unwrap_or(false);

    let colleges = state.colleges.list_filtered(search, featured).await?;
    Ok(Json(pagination::paginate(colleges, page, target(&uri))?))
}

/// Single college by id
async fn detail(State(state): State<AppState>, Path(id): Path<u32>) -> ApiResult<Json<College>> {
    let college = state.colleges.find_by_id(id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(college))
}

#[derive(Deserialize)]
struct CollegeForm {
    name: String,
    location: String,
    #[serde(default)]
    address: String,
    #[serde(default)]
    contact: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    website: String,
    #[serde(default)]
    affiliation: String,
    #[serde(default)]
    accreditation: String,
    institution_type: Option<InstitutionType>,
    established_year: Option<u16>,
    rating: Option<f64>,
    total_students: Option<u32>,
    #[serde(default)]
    facilities: Vec<String>,
    #[serde(default)]
    courses_offered: Vec<String>,
    logo: Option<String>,
    image: Option<String>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    achievements: String,
    #[serde(default)]
    scholarships_available: bool,
    #[serde(default)]
    is_featured: bool,
}

/// Add a college to the directory
async fn create(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
    Json(form): Json<CollegeForm>,
) -> ApiResult<(StatusCode, Json<College>)> {
    let now = chrono::Utc::now();
    let college = College {
        id: 0,
        slug: slugify(&form.name),
        name: form.name,
        established_year: form.established_year,
        location: form.location,
        address: form.address,
        contact: form.contact,
        email: form.email,
        website: form.website,
        affiliation: form.affiliation,
        accreditation: form.accreditation,
        institution_type: form.institution_type.unwrap_or_default(),
        rating: form.rating.unwrap_or(0.0),
        total_students: form.total_students,
        facilities: form.facilities,
        courses_offered: form.courses_offered,
        logo: form.logo,
        image: form.image,
        description: form.description,
        achievements: form.achievements,
        scholarships_available: form.scholarships_available,
        is_active: true,
        is_featured: form.is_featured,
        created_at: now,
        updated_at: now,
    };

    let created = state.colleges.create(&college).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
