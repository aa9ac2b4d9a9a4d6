//! Temporal partitioning of shows into past and upcoming.
//!
//! Classification is a pure function of a show's start time and the
//! caller-supplied evaluation instant. Nothing here reads the clock, so one
//! request can partition many show lists against the same instant.

use std::cmp::Reverse;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::Show;
use super::ids::ShowId;
use crate::error::DirectoryError;

/// Which side of the evaluation instant a show falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Timing {
    /// Started at or before the evaluation instant.
    Past,
    /// Starts strictly after the evaluation instant.
    Upcoming,
}

/// Result of [`partition`].
///
/// Every input show lands in exactly one of the three fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    /// Shows with `start_time <= now`, latest first.
    pub past: Vec<Show>,
    /// Shows with `start_time > now`, latest first.
    pub upcoming: Vec<Show>,
    /// Shows without a usable start time.
    pub rejected: Vec<ShowId>,
}

impl Partition {
    /// Bucket for the given timing.
    #[must_use]
    pub fn bucket(&self, timing: Timing) -> &[Show] {
        match timing {
            Timing::Past => &self.past,
            Timing::Upcoming => &self.upcoming,
        }
    }
}

/// Classifies a single show. `None` when it has no start time.
///
/// The boundary is exclusive for upcoming: a show starting exactly at
/// `now` is past.
#[must_use]
pub fn classify(show: &Show, now: DateTime<Utc>) -> Option<Timing> {
    show.start_time.map(|start| {
        if start > now {
            Timing::Upcoming
        } else {
            Timing::Past
        }
    })
}

/// Splits `shows` into past and upcoming relative to `now`.
///
/// Shows without a start time are excluded into [`Partition::rejected`]
/// and logged at warn level. Both buckets are ordered by start time
/// descending, then by id descending.
#[must_use]
pub fn partition(shows: &[Show], now: DateTime<Utc>) -> Partition {
    let mut out = Partition::default();
    for show in shows {
        match classify(show, now) {
            Some(Timing::Past) => out.past.push(*show),
            Some(Timing::Upcoming) => out.upcoming.push(*show),
            None => {
                tracing::warn!(show_id = %show.id, "show has no usable start time, excluded");
                out.rejected.push(show.id);
            }
        }
    }
    out.past.sort_by_key(|s| Reverse((s.start_time, s.id)));
    out.upcoming.sort_by_key(|s| Reverse((s.start_time, s.id)));
    out
}

/// Like [`partition`], but refuses input containing a show without a
/// usable start time.
///
/// # Errors
///
/// Returns [`DirectoryError::MalformedTime`] naming the first such show.
pub fn partition_strict(shows: &[Show], now: DateTime<Utc>) -> Result<Partition, DirectoryError> {
    let out = partition(shows, now);
    match out.rejected.first() {
        Some(id) => Err(DirectoryError::MalformedTime(format!(
            "show {id} has no usable start time"
        ))),
        None => Ok(out),
    }
}

/// Number of shows in `shows` that are upcoming at `now`.
///
/// Equal to `partition(shows, now).upcoming.len()`.
#[must_use]
pub fn upcoming_count(shows: &[Show], now: DateTime<Utc>) -> usize {
    partition(shows, now).upcoming.len()
}
