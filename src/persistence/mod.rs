//! Persistence layer: the entity store.
//!
//! [`EntityStore`] is the only shared mutable resource in the crate. It is
//! handed to the service as an `Arc<dyn EntityStore>`, so the engines can
//! be tested against [`MemoryStore`] and deployed against [`SqliteStore`].
//!
//! Every create runs as one atomic unit: either the full record (and, for
//! shows, the reference check) is written, or nothing is.

pub mod memory;
pub mod sqlite;

use async_trait::async_trait;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::domain::{
    Artist, ArtistId, ArtistProfile, NewShow, Show, Venue, VenueId, VenueProfile,
};
use crate::error::DirectoryError;

/// Durable keeper of venues, artists and shows.
///
/// Lookups return `Ok(None)` for unknown ids; only store failures are
/// errors. Lists are ordered by id, except the per-entity show lists which
/// are latest start first.
#[async_trait]
pub trait EntityStore: Send + Sync + std::fmt::Debug {
    /// Inserts a venue and returns it with its new id.
    ///
    /// # Errors
    ///
    /// [`DirectoryError::Persistence`] on store failure.
    async fn create_venue(&self, profile: &VenueProfile) -> Result<Venue, DirectoryError>;

    /// Inserts an artist and returns it with its new id.
    ///
    /// # Errors
    ///
    /// [`DirectoryError::Persistence`] on store failure.
    async fn create_artist(&self, profile: &ArtistProfile) -> Result<Artist, DirectoryError>;

    /// Inserts a show after checking both references exist.
    ///
    /// # Errors
    ///
    /// [`DirectoryError::Reference`] when the venue or artist is missing;
    /// nothing is written in that case.
    async fn create_show(&self, show: &NewShow) -> Result<Show, DirectoryError>;

    /// Venue by id.
    ///
    /// # Errors
    ///
    /// [`DirectoryError::Persistence`] on store failure.
    async fn venue(&self, id: VenueId) -> Result<Option<Venue>, DirectoryError>;

    /// Artist by id.
    ///
    /// # Errors
    ///
    /// [`DirectoryError::Persistence`] on store failure.
    async fn artist(&self, id: ArtistId) -> Result<Option<Artist>, DirectoryError>;

    /// All venues by id.
    ///
    /// # Errors
    ///
    /// [`DirectoryError::Persistence`] on store failure.
    async fn list_venues(&self) -> Result<Vec<Venue>, DirectoryError>;

    /// All artists by id.
    ///
    /// # Errors
    ///
    /// [`DirectoryError::Persistence`] on store failure.
    async fn list_artists(&self) -> Result<Vec<Artist>, DirectoryError>;

    /// All shows by id.
    ///
    /// # Errors
    ///
    /// [`DirectoryError::Persistence`] on store failure.
    async fn list_shows(&self) -> Result<Vec<Show>, DirectoryError>;

    /// Shows at one venue, latest start first.
    ///
    /// # Errors
    ///
    /// [`DirectoryError::Persistence`] on store failure.
    async fn shows_for_venue(&self, id: VenueId) -> Result<Vec<Show>, DirectoryError>;

    /// Shows by one artist, latest start first.
    ///
    /// # Errors
    ///
    /// [`DirectoryError::Persistence`] on store failure.
    async fn shows_for_artist(&self, id: ArtistId) -> Result<Vec<Show>, DirectoryError>;

    /// Removes a venue that no show refers to.
    ///
    /// # Errors
    ///
    /// [`DirectoryError::VenueNotFound`] for an unknown id and
    /// [`DirectoryError::Conflict`] while shows still reference the venue.
    async fn delete_venue(&self, id: VenueId) -> Result<(), DirectoryError>;

    /// Cheap liveness probe.
    ///
    /// # Errors
    ///
    /// [`DirectoryError::Persistence`] when the store is unreachable.
    async fn health_check(&self) -> Result<(), DirectoryError>;
}

/// Shared message for a venue that still has shows.
pub(crate) fn venue_in_use(id: VenueId, shows: usize) -> DirectoryError {
    DirectoryError::Conflict(format!("venue {id} still has {shows} show(s)"))
}

/// Orders a show list latest start first, then by id descending.
pub(crate) fn latest_first(shows: &mut [Show]) {
    shows.sort_by(|a, b| (b.start_time, b.id).cmp(&(a.start_time, a.id)));
}
