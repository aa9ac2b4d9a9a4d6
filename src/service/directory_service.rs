//! Directory service: validates input, talks to the store, and runs the
//! query engines over what it loads.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::{
    Artist, ArtistDetailView, ArtistForm, ArtistId, ArtistSnapshot, LocationGroup, SearchQuery,
    SearchResults, Show, ShowForm, ShowListing, Venue, VenueDetailView, VenueForm, VenueId,
    VenueSnapshot, group_venues_by_location, search_artists, search_venues,
};
use crate::error::DirectoryError;
use crate::persistence::EntityStore;

/// Orchestration layer for every directory operation.
///
/// Stateless coordinator around an injected [`EntityStore`] handle. Every
/// time-dependent operation takes the evaluation instant as an argument;
/// callers pick one instant per request so all partitions inside that
/// request agree.
#[derive(Debug, Clone)]
pub struct DirectoryService {
    store: Arc<dyn EntityStore>,
}

impl DirectoryService {
    /// Creates a new `DirectoryService` over the given store.
    #[must_use]
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self { store }
    }

    // ── Writes ──────────────────────────────────────────────────────────

    /// Validates and stores a new venue.
    ///
    /// # Errors
    ///
    /// [`DirectoryError::Validation`] for bad input, or a store error.
    pub async fn create_venue(&self, form: &VenueForm) -> Result<Venue, DirectoryError> {
        let profile = form.validate().inspect_err(|e| {
            tracing::warn!(error = %e, "venue rejected");
        })?;
        let venue = self.store.create_venue(&profile).await?;
        tracing::info!(venue_id = %venue.id, name = %venue.profile.name, "venue listed");
        Ok(venue)
    }

    /// Validates and stores a new artist.
    ///
    /// # Errors
    ///
    /// [`DirectoryError::Validation`] for bad input, or a store error.
    pub async fn create_artist(&self, form: &ArtistForm) -> Result<Artist, DirectoryError> {
        let profile = form.validate().inspect_err(|e| {
            tracing::warn!(error = %e, "artist rejected");
        })?;
        let artist = self.store.create_artist(&profile).await?;
        tracing::info!(artist_id = %artist.id, name = %artist.profile.name, "artist listed");
        Ok(artist)
    }

    /// Validates and stores a new show.
    ///
    /// # Errors
    ///
    /// [`DirectoryError::Validation`] or [`DirectoryError::MalformedTime`]
    /// for bad input, [`DirectoryError::Reference`] when the venue or
    /// artist does not exist.
    pub async fn create_show(&self, form: &ShowForm) -> Result<Show, DirectoryError> {
        let new_show = form.validate().inspect_err(|e| {
            tracing::warn!(error = %e, "show rejected");
        })?;
        let show = self.store.create_show(&new_show).await.inspect_err(|e| {
            tracing::warn!(error = %e, "show rejected");
        })?;
        tracing::info!(
            show_id = %show.id,
            venue_id = %show.venue_id,
            artist_id = %show.artist_id,
            "show listed"
        );
        Ok(show)
    }

    /// Deletes a venue that has no shows.
    ///
    /// # Errors
    ///
    /// [`DirectoryError::VenueNotFound`] or [`DirectoryError::Conflict`].
    pub async fn delete_venue(&self, id: VenueId) -> Result<(), DirectoryError> {
        self.store.delete_venue(id).await?;
        tracing::info!(venue_id = %id, "venue deleted");
        Ok(())
    }

    // ── Plain reads ─────────────────────────────────────────────────────

    /// Venue by id.
    ///
    /// # Errors
    ///
    /// Store failure only.
    pub async fn venue(&self, id: VenueId) -> Result<Option<Venue>, DirectoryError> {
        self.store.venue(id).await
    }

    /// Artist by id.
    ///
    /// # Errors
    ///
    /// Store failure only.
    pub async fn artist(&self, id: ArtistId) -> Result<Option<Artist>, DirectoryError> {
        self.store.artist(id).await
    }

    /// All venues by id.
    ///
    /// # Errors
    ///
    /// Store failure only.
    pub async fn list_venues(&self) -> Result<Vec<Venue>, DirectoryError> {
        self.store.list_venues().await
    }

    /// All artists by id.
    ///
    /// # Errors
    ///
    /// Store failure only.
    pub async fn list_artists(&self) -> Result<Vec<Artist>, DirectoryError> {
        self.store.list_artists().await
    }

    /// All shows by id.
    ///
    /// # Errors
    ///
    /// Store failure only.
    pub async fn list_shows(&self) -> Result<Vec<Show>, DirectoryError> {
        self.store.list_shows().await
    }

    /// Shows at one venue, latest first.
    ///
    /// # Errors
    ///
    /// Store failure only.
    pub async fn shows_for_venue(&self, id: VenueId) -> Result<Vec<Show>, DirectoryError> {
        self.store.shows_for_venue(id).await
    }

    /// Shows by one artist, latest first.
    ///
    /// # Errors
    ///
    /// Store failure only.
    pub async fn shows_for_artist(&self, id: ArtistId) -> Result<Vec<Show>, DirectoryError> {
        self.store.shows_for_artist(id).await
    }

    // ── Snapshots and views ─────────────────────────────────────────────

    /// Id, name and upcoming-show count for one venue.
    ///
    /// # Errors
    ///
    /// Store failure only.
    pub async fn venue_snapshot(
        &self,
        venue: &Venue,
        now: DateTime<Utc>,
    ) -> Result<VenueSnapshot, DirectoryError> {
        let shows = self.store.shows_for_venue(venue.id).await?;
        Ok(VenueSnapshot::build(venue, &shows, now))
    }

    /// Id, name and upcoming-show count for one artist.
    ///
    /// # Errors
    ///
    /// Store failure only.
    pub async fn artist_snapshot(
        &self,
        artist: &Artist,
        now: DateTime<Utc>,
    ) -> Result<ArtistSnapshot, DirectoryError> {
        let shows = self.store.shows_for_artist(artist.id).await?;
        Ok(ArtistSnapshot::build(artist, &shows, now))
    }

    /// Venue page, or `None` if the venue does not exist.
    ///
    /// # Errors
    ///
    /// Store failure only.
    pub async fn venue_detail(
        &self,
        id: VenueId,
        now: DateTime<Utc>,
    ) -> Result<Option<VenueDetailView>, DirectoryError> {
        let Some(venue) = self.store.venue(id).await? else {
            return Ok(None);
        };
        let shows = self.store.shows_for_venue(id).await?;

        let mut artists = HashMap::new();
        for artist_id in shows.iter().map(|s| s.artist_id).collect::<HashSet<_>>() {
            if let Some(artist) = self.store.artist(artist_id).await? {
                artists.insert(artist_id, artist);
            }
        }
        Ok(Some(VenueDetailView::build(&venue, &shows, &artists, now)))
    }

    /// Artist page, or `None` if the artist does not exist.
    ///
    /// # Errors
    ///
    /// Store failure only.
    pub async fn artist_detail(
        &self,
        id: ArtistId,
        now: DateTime<Utc>,
    ) -> Result<Option<ArtistDetailView>, DirectoryError> {
        let Some(artist) = self.store.artist(id).await? else {
            return Ok(None);
        };
        let shows = self.store.shows_for_artist(id).await?;

        let mut venues = HashMap::new();
        for venue_id in shows.iter().map(|s| s.venue_id).collect::<HashSet<_>>() {
            if let Some(venue) = self.store.venue(venue_id).await? {
                venues.insert(venue_id, venue);
            }
        }
        Ok(Some(ArtistDetailView::build(&artist, &shows, &venues, now)))
    }

    /// Every show joined with its venue and artist.
    ///
    /// # Errors
    ///
    /// Store failure only.
    pub async fn show_listing(&self) -> Result<Vec<ShowListing>, DirectoryError> {
        let shows = self.store.list_shows().await?;
        let venues = by_id(self.store.list_venues().await?, |v| v.id);
        let artists = by_id(self.store.list_artists().await?, |a| a.id);
        Ok(ShowListing::build_all(&shows, &venues, &artists))
    }

    // ── Grouping and search ─────────────────────────────────────────────

    /// Venues grouped by `(city, state)` with upcoming-show counts.
    ///
    /// # Errors
    ///
    /// Store failure only.
    pub async fn venues_by_location(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<LocationGroup>, DirectoryError> {
        let venues = self.store.list_venues().await?;
        let index = ShowIndex::load(self.store.as_ref()).await?;
        Ok(group_venues_by_location(&venues, |v| {
            VenueSnapshot::build(v, index.for_venue(v.id), now)
        }))
    }

    /// Venues whose name contains the search term.
    ///
    /// # Errors
    ///
    /// Store failure only.
    pub async fn search_venues(
        &self,
        query: &SearchQuery,
        now: DateTime<Utc>,
    ) -> Result<SearchResults<VenueSnapshot>, DirectoryError> {
        let venues = self.store.list_venues().await?;
        let index = ShowIndex::load(self.store.as_ref()).await?;
        let results = search_venues(&venues, query, |v| {
            VenueSnapshot::build(v, index.for_venue(v.id), now)
        });
        tracing::debug!(term = %query.search_term, count = results.count, "venue search");
        Ok(results)
    }

    /// Artists whose name contains the search term.
    ///
    /// # Errors
    ///
    /// Store failure only.
    pub async fn search_artists(
        &self,
        query: &SearchQuery,
        now: DateTime<Utc>,
    ) -> Result<SearchResults<ArtistSnapshot>, DirectoryError> {
        let artists = self.store.list_artists().await?;
        let index = ShowIndex::load(self.store.as_ref()).await?;
        let results = search_artists(&artists, query, |a| {
            ArtistSnapshot::build(a, index.for_artist(a.id), now)
        });
        tracing::debug!(term = %query.search_term, count = results.count, "artist search");
        Ok(results)
    }

    /// Store liveness.
    ///
    /// # Errors
    ///
    /// [`DirectoryError::Persistence`] when the store is unreachable.
    pub async fn health_check(&self) -> Result<(), DirectoryError> {
        self.store.health_check().await
    }
}

/// All shows loaded once and bucketed by venue and by artist, so listing
/// operations do not query the store per entity.
struct ShowIndex {
    by_venue: HashMap<VenueId, Vec<Show>>,
    by_artist: HashMap<ArtistId, Vec<Show>>,
}

impl ShowIndex {
    async fn load(store: &dyn EntityStore) -> Result<Self, DirectoryError> {
        let mut index = Self {
            by_venue: HashMap::new(),
            by_artist: HashMap::new(),
        };
        for show in store.list_shows().await? {
            index.by_venue.entry(show.venue_id).or_default().push(show);
            index.by_artist.entry(show.artist_id).or_default().push(show);
        }
        Ok(index)
    }

    fn for_venue(&self, id: VenueId) -> &[Show] {
        self.by_venue.get(&id).map(Vec::as_slice).unwrap_or_default()
    }

    fn for_artist(&self, id: ArtistId) -> &[Show] {
        self.by_artist.get(&id).map(Vec::as_slice).unwrap_or_default()
    }
}

fn by_id<K: std::hash::Hash + Eq, E>(items: Vec<E>, key: impl Fn(&E) -> K) -> HashMap<K, E> {
    items.into_iter().map(|e| (key(&e), e)).collect()
}
