//! Venue handlers: grouped listing, create, search, detail, delete.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{AtParams, SearchParams};
use crate::app_state::AppState;
use crate::domain::{
    LocationGroup, SearchResults, Venue, VenueDetailView, VenueForm, VenueId, VenueSnapshot,
};
use crate::error::{DirectoryError, ErrorResponse};

/// `GET /venues`: Venues grouped by city and state.
///
/// # Errors
///
/// Returns [`DirectoryError`] on store failures.
#[utoipa::path(
    get,
    path = "/api/v1/venues",
    tag = "Venues",
    summary = "List venues by location",
    description = "Groups every venue by (city, state) in first-seen order, each with its upcoming show count.",
    params(AtParams),
    responses(
        (status = 200, description = "Venues grouped by location", body = Vec<LocationGroup>),
    )
)]
pub async fn list_venues(
    State(state): State<AppState>,
    params: Result<Query<AtParams>, QueryRejection>,
) -> Result<impl IntoResponse, DirectoryError> {
    let Query(params) = params?;
    let groups = state.directory.venues_by_location(params.instant()).await?;
    Ok(Json(groups))
}

/// `POST /venues`: List a new venue.
///
/// # Errors
///
/// Returns [`DirectoryError::Validation`] on missing or malformed fields.
#[utoipa::path(
    post,
    path = "/api/v1/venues",
    tag = "Venues",
    summary = "Create a venue",
    description = "Validates the form and stores a new venue. Name, city, state, address and at least one genre are required.",
    request_body = VenueForm,
    responses(
        (status = 201, description = "Venue created", body = Venue),
        (status = 400, description = "Invalid venue form", body = ErrorResponse),
    )
)]
pub async fn create_venue(
    State(state): State<AppState>,
    form: Result<Json<VenueForm>, JsonRejection>,
) -> Result<impl IntoResponse, DirectoryError> {
    let Json(form) = form?;
    let venue = state.directory.create_venue(&form).await?;
    Ok((StatusCode::CREATED, Json(venue)))
}

/// `GET /venues/search`: Case-insensitive name search.
///
/// # Errors
///
/// Returns [`DirectoryError`] on store failures.
#[utoipa::path(
    get,
    path = "/api/v1/venues/search",
    tag = "Venues",
    summary = "Search venues",
    description = "Returns every venue whose name contains the search term, ignoring case, optionally restricted to one genre.",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching venues", body = SearchResults<VenueSnapshot>),
    )
)]
pub async fn search_venues(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<impl IntoResponse, DirectoryError> {
    let Query(params) = params?;
    let (query, now) = params.into_query();
    let results = state.directory.search_venues(&query, now).await?;
    Ok(Json(results))
}

/// `GET /venues/:id`: Venue page with past and upcoming shows.
///
/// # Errors
///
/// Returns [`DirectoryError::VenueNotFound`] if the venue does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/venues/{id}",
    tag = "Venues",
    summary = "Get venue details",
    description = "Returns the venue profile with its shows split into past and upcoming, latest first.",
    params(
        ("id" = i64, Path, description = "Venue id"),
        AtParams,
    ),
    responses(
        (status = 200, description = "Venue details", body = VenueDetailView),
        (status = 400, description = "Malformed id or query", body = ErrorResponse),
        (status = 404, description = "Venue not found", body = ErrorResponse),
    )
)]
pub async fn get_venue(
    State(state): State<AppState>,
    id: Result<Path<VenueId>, PathRejection>,
    params: Result<Query<AtParams>, QueryRejection>,
) -> Result<impl IntoResponse, DirectoryError> {
    let Path(id) = id?;
    let Query(params) = params?;
    let view = state
        .directory
        .venue_detail(id, params.instant())
        .await?
        .ok_or(DirectoryError::VenueNotFound(id))?;
    Ok(Json(view))
}

/// `DELETE /venues/:id`: Remove a venue with no shows.
///
/// # Errors
///
/// Returns [`DirectoryError::VenueNotFound`] if the venue does not exist,
/// [`DirectoryError::Conflict`] if shows still reference it.
#[utoipa::path(
    delete,
    path = "/api/v1/venues/{id}",
    tag = "Venues",
    summary = "Delete a venue",
    description = "Removes a venue. Venues that still have shows are not deleted.",
    params(
        ("id" = i64, Path, description = "Venue id"),
    ),
    responses(
        (status = 204, description = "Venue deleted"),
        (status = 400, description = "Malformed id or query", body = ErrorResponse),
        (status = 404, description = "Venue not found", body = ErrorResponse),
        (status = 409, description = "Venue still has shows", body = ErrorResponse),
    )
)]
pub async fn delete_venue(
    State(state): State<AppState>,
    id: Result<Path<VenueId>, PathRejection>,
) -> Result<impl IntoResponse, DirectoryError> {
    let Path(id) = id?;
    state.directory.delete_venue(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Venue routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/venues", get(list_venues).post(create_venue))
        .route("/venues/search", get(search_venues))
        .route("/venues/{id}", get(get_venue).delete(delete_venue))
}
