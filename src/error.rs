//! Directory error types with HTTP status code mapping.
//!
//! [`DirectoryError`] is the central error type for the directory. Each
//! variant maps to a specific HTTP status code and structured JSON error
//! response, so callers can tell bad input from a dangling reference from
//! an unavailable store.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{ArtistId, VenueId};

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 1003,
///     "message": "venue 42 does not exist",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code (see [`DirectoryError::error_code`]).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Kind of entity a show refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// A venue row.
    Venue,
    /// An artist row.
    Artist,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Venue => f.write_str("venue"),
            Self::Artist => f.write_str("artist"),
        }
    }
}

/// Directory error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category           | HTTP Status                     |
/// |-----------|--------------------|---------------------------------|
/// | 1000–1999 | Input              | 400 Bad Request / 422           |
/// | 2000–2999 | Not Found/Conflict | 404 Not Found / 409 Conflict    |
/// | 3000–3999 | Server             | 500 Internal Server Error       |
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    /// A required field is missing or a field is malformed.
    #[error("invalid input: {0}")]
    Validation(String),

    /// A start time could not be parsed, or a stored show has none.
    #[error("malformed start time: {0}")]
    MalformedTime(String),

    /// A show refers to a venue or artist that does not exist.
    #[error("{entity} {id} does not exist")]
    Reference {
        /// Which side of the show is dangling.
        entity: EntityKind,
        /// The id that was referenced.
        id: i64,
    },

    /// Venue with the given id was not found.
    #[error("venue not found: {0}")]
    VenueNotFound(VenueId),

    /// Artist with the given id was not found.
    #[error("artist not found: {0}")]
    ArtistNotFound(ArtistId),

    /// The operation would break a relationship that still exists.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Store failure (connection, query, migration).
    #[error("persistence error: {0}")]
    Persistence(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl DirectoryError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::Validation(_) => 1001,
            Self::MalformedTime(_) => 1002,
            Self::Reference { .. } => 1003,
            Self::VenueNotFound(_) => 2001,
            Self::ArtistNotFound(_) => 2002,
            Self::Conflict(_) => 2003,
            Self::Persistence(_) => 3001,
            Self::Internal(_) => 3000,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::MalformedTime(_) => StatusCode::BAD_REQUEST,
            Self::Reference { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::VenueNotFound(_) | Self::ArtistNotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Persistence(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Shorthand for a [`DirectoryError::Validation`] error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

impl From<sqlx::Error> for DirectoryError {
    fn from(err: sqlx::Error) -> Self {
        Self::Persistence(err.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for DirectoryError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        Self::Persistence(format!("migration failed: {err}"))
    }
}

impl From<JsonRejection> for DirectoryError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for DirectoryError {
    fn from(rejection: PathRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for DirectoryError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl IntoResponse for DirectoryError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let details = match &self {
            Self::Reference { entity, id } => Some(format!("{entity}_id={id}")),
            _ => None,
        };
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
