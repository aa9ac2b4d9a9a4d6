//! Show entity linking one artist to one venue at a start time.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ids::{ArtistId, ShowId, VenueId};
use crate::error::DirectoryError;

/// Naive layouts accepted besides RFC 3339. Interpreted as UTC.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// A stored show.
///
/// `start_time` is `None` only for legacy rows whose stored value is
/// missing or unreadable; such shows are never classified as past or
/// upcoming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Show {
    /// Store-generated identifier.
    pub id: ShowId,
    /// Hosting venue.
    pub venue_id: VenueId,
    /// Performing artist.
    pub artist_id: ArtistId,
    /// When the show starts.
    pub start_time: Option<DateTime<Utc>>,
}

/// A validated show ready to be inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewShow {
    /// Hosting venue; must exist.
    pub venue_id: VenueId,
    /// Performing artist; must exist.
    pub artist_id: ArtistId,
    /// When the show starts.
    pub start_time: DateTime<Utc>,
}

/// Raw, unvalidated show fields as submitted by a client.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct ShowForm {
    /// Hosting venue id (required).
    pub venue_id: Option<i64>,
    /// Performing artist id (required).
    pub artist_id: Option<i64>,
    /// Start time, RFC 3339 or `YYYY-MM-DD HH:MM[:SS]` in UTC (required).
    pub start_time: Option<String>,
}

impl ShowForm {
    /// Checks presence of every field and parses the start time.
    ///
    /// Does not check that the venue or artist exist; the store does that
    /// inside the insert transaction.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Validation`] for a missing field and
    /// [`DirectoryError::MalformedTime`] for an unparseable start time.
    pub fn validate(&self) -> Result<NewShow, DirectoryError> {
        let venue_id = self
            .venue_id
            .ok_or_else(|| DirectoryError::validation("venue_id is required"))?;
        let artist_id = self
            .artist_id
            .ok_or_else(|| DirectoryError::validation("artist_id is required"))?;
        let raw = self
            .start_time
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| DirectoryError::validation("start_time is required"))?;
        let start_time =
            parse_start_time(raw).ok_or_else(|| DirectoryError::MalformedTime(raw.to_string()))?;

        Ok(NewShow {
            venue_id: VenueId::new(venue_id),
            artist_id: ArtistId::new(artist_id),
            start_time,
        })
    }
}

/// Parses a start time in RFC 3339 or one of the naive UTC layouts.
#[must_use]
pub fn parse_start_time(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Canonical persisted form. Fixed width, so text order is time order.
#[must_use]
pub fn format_start_time(start_time: DateTime<Utc>) -> String {
    start_time.to_rfc3339_opts(SecondsFormat::Micros, true)
}
