//! Artist handlers: index, create, search, detail.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{ArtistListItem, AtParams, SearchParams};
use crate::app_state::AppState;
use crate::domain::{Artist, ArtistDetailView, ArtistForm, ArtistId, ArtistSnapshot, SearchResults};
use crate::error::{DirectoryError, ErrorResponse};

/// `GET /artists`: Every artist's id and name.
///
/// # Errors
///
/// Returns [`DirectoryError`] on store failures.
#[utoipa::path(
    get,
    path = "/api/v1/artists",
    tag = "Artists",
    summary = "List artists",
    description = "Returns the id and name of every artist, ordered by id.",
    responses(
        (status = 200, description = "Artist index", body = Vec<ArtistListItem>),
    )
)]
pub async fn list_artists(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, DirectoryError> {
    let items: Vec<ArtistListItem> = state
        .directory
        .list_artists()
        .await?
        .into_iter()
        .map(ArtistListItem::from)
        .collect();
    Ok(Json(items))
}

/// `POST /artists`: List a new artist.
///
/// # Errors
///
/// Returns [`DirectoryError::Validation`] on missing or malformed fields.
#[utoipa::path(
    post,
    path = "/api/v1/artists",
    tag = "Artists",
    summary = "Create an artist",
    description = "Validates the form and stores a new artist. Name, city, state and at least one genre are required.",
    request_body = ArtistForm,
    responses(
        (status = 201, description = "Artist created", body = Artist),
        (status = 400, description = "Invalid artist form", body = ErrorResponse),
    )
)]
pub async fn create_artist(
    State(state): State<AppState>,
    form: Result<Json<ArtistForm>, JsonRejection>,
) -> Result<impl IntoResponse, DirectoryError> {
    let Json(form) = form?;
    let artist = state.directory.create_artist(&form).await?;
    Ok((StatusCode::CREATED, Json(artist)))
}

/// `GET /artists/search`: Case-insensitive name search.
///
/// # Errors
///
/// Returns [`DirectoryError`] on store failures.
#[utoipa::path(
    get,
    path = "/api/v1/artists/search",
    tag = "Artists",
    summary = "Search artists",
    description = "Returns every artist whose name contains the search term, ignoring case, optionally restricted to one genre.",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching artists", body = SearchResults<ArtistSnapshot>),
    )
)]
pub async fn search_artists(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<impl IntoResponse, DirectoryError> {
    let Query(params) = params?;
    let (query, now) = params.into_query();
    let results = state.directory.search_artists(&query, now).await?;
    Ok(Json(results))
}

/// `GET /artists/:id`: Artist page with past and upcoming shows.
///
/// # Errors
///
/// Returns [`DirectoryError::ArtistNotFound`] if the artist does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/artists/{id}",
    tag = "Artists",
    summary = "Get artist details",
    description = "Returns the artist profile with its shows split into past and upcoming, latest first.",
    params(
        ("id" = i64, Path, description = "Artist id"),
        AtParams,
    ),
    responses(
        (status = 200, description = "Artist details", body = ArtistDetailView),
        (status = 400, description = "Malformed id or query", body = ErrorResponse),
        (status = 404, description = "Artist not found", body = ErrorResponse),
    )
)]
pub async fn get_artist(
    State(state): State<AppState>,
    id: Result<Path<ArtistId>, PathRejection>,
    params: Result<Query<AtParams>, QueryRejection>,
) -> Result<impl IntoResponse, DirectoryError> {
    let Path(id) = id?;
    let Query(params) = params?;
    let view = state
        .directory
        .artist_detail(id, params.instant())
        .await?
        .ok_or(DirectoryError::ArtistNotFound(id))?;
    Ok(Json(view))
}

/// Artist routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/artists", get(list_artists).post(create_artist))
        .route("/artists/search", get(search_artists))
        .route("/artists/{id}", get(get_artist))
}
