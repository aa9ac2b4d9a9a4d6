//! Show handlers: listing and create.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::app_state::AppState;
use crate::domain::{Show, ShowForm, ShowListing};
use crate::error::{DirectoryError, ErrorResponse};

/// `GET /shows`: Every show with its venue and artist.
///
/// # Errors
///
/// Returns [`DirectoryError`] on store failures.
#[utoipa::path(
    get,
    path = "/api/v1/shows",
    tag = "Shows",
    summary = "List shows",
    description = "Returns every show joined with its venue name and artist name and image, ordered by id.",
    responses(
        (status = 200, description = "Show listing", body = Vec<ShowListing>),
    )
)]
pub async fn list_shows(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, DirectoryError> {
    let rows = state.directory.show_listing().await?;
    Ok(Json(rows))
}

/// `POST /shows`: Book an artist at a venue.
///
/// # Errors
///
/// Returns [`DirectoryError::Validation`] or
/// [`DirectoryError::MalformedTime`] on bad input,
/// [`DirectoryError::Reference`] if the venue or artist does not exist.
#[utoipa::path(
    post,
    path = "/api/v1/shows",
    tag = "Shows",
    summary = "Create a show",
    description = "Validates the form and stores a new show. Both referenced entities must exist.",
    request_body = ShowForm,
    responses(
        (status = 201, description = "Show created", body = Show),
        (status = 400, description = "Invalid show form", body = ErrorResponse),
        (status = 422, description = "Venue or artist does not exist", body = ErrorResponse),
    )
)]
pub async fn create_show(
    State(state): State<AppState>,
    form: Result<Json<ShowForm>, JsonRejection>,
) -> Result<impl IntoResponse, DirectoryError> {
    let Json(form) = form?;
    let show = state.directory.create_show(&form).await?;
    Ok((StatusCode::CREATED, Json(show)))
}

/// Show routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/shows", get(list_shows).post(create_show))
}
