//! Field-level checks shared by the create forms.
//!
//! Raw form values arrive unvalidated from the request layer. These helpers
//! trim them, reject blanks where a value is required, and check link and
//! genre fields before anything reaches the store.

use url::Url;

use super::genres::{GENRE_DELIMITER, Genres};
use crate::error::DirectoryError;

/// Returns the trimmed value, or a validation error naming `field` when it
/// is absent or blank.
pub(crate) fn required(field: &str, value: Option<&str>) -> Result<String, DirectoryError> {
    optional(value).ok_or_else(|| DirectoryError::validation(format!("{field} is required")))
}

/// Trims the value; blank becomes `None`.
pub(crate) fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Like [`optional`], but a present value must be an absolute http(s) URL.
pub(crate) fn optional_link(
    field: &str,
    value: Option<&str>,
) -> Result<Option<String>, DirectoryError> {
    let Some(link) = optional(value) else {
        return Ok(None);
    };
    let parsed = Url::parse(&link)
        .map_err(|e| DirectoryError::validation(format!("{field} is not a valid URL: {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(Some(link)),
        other => Err(DirectoryError::validation(format!(
            "{field} must use http or https, got {other}"
        ))),
    }
}

/// At least one genre is required; tags may not contain the delimiter.
pub(crate) fn genres(tags: &[String]) -> Result<Genres, DirectoryError> {
    if let Some(bad) = tags.iter().find(|t| t.contains(GENRE_DELIMITER)) {
        return Err(DirectoryError::validation(format!(
            "genre {bad:?} may not contain '{GENRE_DELIMITER}'"
        )));
    }
    let genres = Genres::new(tags);
    if genres.is_empty() {
        return Err(DirectoryError::validation("at least one genre is required"));
    }
    Ok(genres)
}
