//! In-process entity store.
//!
//! [`MemoryStore`] keeps every table in a `BTreeMap` behind one
//! [`tokio::sync::RwLock`]. Reads share the lock; each create or delete
//! takes the write lock for its whole check-then-insert sequence, which
//! makes it atomic with respect to every other operation.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{EntityStore, latest_first, venue_in_use};
use crate::domain::{
    Artist, ArtistId, ArtistProfile, NewShow, Show, ShowId, Venue, VenueId, VenueProfile,
};
use crate::error::{DirectoryError, EntityKind};

#[derive(Debug, Default)]
struct Tables {
    venues: BTreeMap<VenueId, Venue>,
    artists: BTreeMap<ArtistId, Artist>,
    shows: BTreeMap<ShowId, Show>,
    last_venue_id: i64,
    last_artist_id: i64,
    last_show_id: i64,
}

/// Entity store held entirely in memory. Contents are lost on drop.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EntityStore for MemoryStore {
    async fn create_venue(&self, profile: &VenueProfile) -> Result<Venue, DirectoryError> {
        let mut t = self.tables.write().await;
        t.last_venue_id += 1;
        let venue = Venue {
            id: VenueId::new(t.last_venue_id),
            profile: profile.clone(),
        };
        t.venues.insert(venue.id, venue.clone());
        Ok(venue)
    }

    async fn create_artist(&self, profile: &ArtistProfile) -> Result<Artist, DirectoryError> {
        let mut t = self.tables.write().await;
        t.last_artist_id += 1;
        let artist = Artist {
            id: ArtistId::new(t.last_artist_id),
            profile: profile.clone(),
        };
        t.artists.insert(artist.id, artist.clone());
        Ok(artist)
    }

    async fn create_show(&self, show: &NewShow) -> Result<Show, DirectoryError> {
        let mut t = self.tables.write().await;
        if !t.venues.contains_key(&show.venue_id) {
            return Err(DirectoryError::Reference {
                entity: EntityKind::Venue,
                id: show.venue_id.get(),
            });
        }
        if !t.artists.contains_key(&show.artist_id) {
            return Err(DirectoryError::Reference {
                entity: EntityKind::Artist,
                id: show.artist_id.get(),
            });
        }
        t.last_show_id += 1;
        let stored = Show {
            id: ShowId::new(t.last_show_id),
            venue_id: show.venue_id,
            artist_id: show.artist_id,
            start_time: Some(show.start_time),
        };
        t.shows.insert(stored.id, stored);
        Ok(stored)
    }

    async fn venue(&self, id: VenueId) -> Result<Option<Venue>, DirectoryError> {
        Ok(self.tables.read().await.venues.get(&id).cloned())
    }

    async fn artist(&self, id: ArtistId) -> Result<Option<Artist>, DirectoryError> {
        Ok(self.tables.read().await.artists.get(&id).cloned())
    }

    async fn list_venues(&self) -> Result<Vec<Venue>, DirectoryError> {
        Ok(self.tables.read().await.venues.values().cloned().collect())
    }

    async fn list_artists(&self) -> Result<Vec<Artist>, DirectoryError> {
        Ok(self.tables.read().await.artists.values().cloned().collect())
    }

    async fn list_shows(&self) -> Result<Vec<Show>, DirectoryError> {
        Ok(self.tables.read().await.shows.values().copied().collect())
    }

    async fn shows_for_venue(&self, id: VenueId) -> Result<Vec<Show>, DirectoryError> {
        let t = self.tables.read().await;
        let mut shows: Vec<Show> = t.shows.values().filter(|s| s.venue_id == id).copied().collect();
        latest_first(&mut shows);
        Ok(shows)
    }

    async fn shows_for_artist(&self, id: ArtistId) -> Result<Vec<Show>, DirectoryError> {
        let t = self.tables.read().await;
        let mut shows: Vec<Show> = t
            .shows
            .values()
            .filter(|s| s.artist_id == id)
            .copied()
            .collect();
        latest_first(&mut shows);
        Ok(shows)
    }

    async fn delete_venue(&self, id: VenueId) -> Result<(), DirectoryError> {
        let mut t = self.tables.write().await;
        if !t.venues.contains_key(&id) {
            return Err(DirectoryError::VenueNotFound(id));
        }
        let dependents = t.shows.values().filter(|s| s.venue_id == id).count();
        if dependents > 0 {
            return Err(venue_in_use(id, dependents));
        }
        t.venues.remove(&id);
        Ok(())
    }

    async fn health_check(&self) -> Result<(), DirectoryError> {
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::sync::Arc;

    use chrono::{Duration, Utc};

    use super::*;
    use crate::domain::Genres;

    fn profile(name: &str) -> VenueProfile {
        VenueProfile {
            name: name.to_string(),
            city: "New York".to_string(),
            state: "NY".to_string(),
            address: "335 Delancey Street".to_string(),
            genres: Genres::new(["Classical", "R&B", "Hip-Hop"]),
            phone: None,
            image_link: None,
            facebook_link: None,
            website: None,
            seeking_talent: false,
            seeking_description: None,
        }
    }

    fn artist_profile() -> ArtistProfile {
        ArtistProfile {
            name: "The Wild Sax Band".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            genres: Genres::new(["Jazz", "Classical"]),
            phone: None,
            image_link: None,
            facebook_link: None,
            website: None,
            seeking_venue: false,
            seeking_description: None,
        }
    }

    #[tokio::test]
    async fn ids_are_sequential_from_one() {
        let store = MemoryStore::new();
        let (Ok(a), Ok(b)) = (
            store.create_venue(&profile("A")).await,
            store.create_venue(&profile("B")).await,
        ) else {
            panic!("create failed");
        };
        assert_eq!(a.id.get(), 1);
        assert_eq!(b.id.get(), 2);
    }

    #[tokio::test]
    async fn dangling_show_leaves_count_unchanged() {
        let store = MemoryStore::new();
        let Ok(artist) = store.create_artist(&artist_profile()).await else {
            panic!("create failed");
        };
        let show = NewShow {
            venue_id: VenueId::new(1),
            artist_id: artist.id,
            start_time: Utc::now(),
        };
        assert!(matches!(
            store.create_show(&show).await,
            Err(DirectoryError::Reference {
                entity: EntityKind::Venue,
                id: 1
            })
        ));
        assert!(matches!(store.list_shows().await, Ok(v) if v.is_empty()));
    }

    #[tokio::test]
    async fn per_entity_show_lists_are_latest_first() {
        let store = MemoryStore::new();
        let (Ok(venue), Ok(artist)) = (
            store.create_venue(&profile("The Dueling Pianos Bar")).await,
            store.create_artist(&artist_profile()).await,
        ) else {
            panic!("fixtures failed");
        };
        let base = Utc::now();
        for days in [1, 30, -4] {
            let show = NewShow {
                venue_id: venue.id,
                artist_id: artist.id,
                start_time: base + Duration::days(days),
            };
            assert!(store.create_show(&show).await.is_ok());
        }
        let Ok(shows) = store.shows_for_venue(venue.id).await else {
            panic!("query failed");
        };
        let ids: Vec<i64> = shows.iter().map(|s| s.id.get()).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[tokio::test]
    async fn delete_is_rejected_while_shows_exist() {
        let store = MemoryStore::new();
        let (Ok(venue), Ok(artist)) = (
            store.create_venue(&profile("Park Square")).await,
            store.create_artist(&artist_profile()).await,
        ) else {
            panic!("fixtures failed");
        };
        let show = NewShow {
            venue_id: venue.id,
            artist_id: artist.id,
            start_time: Utc::now(),
        };
        assert!(store.create_show(&show).await.is_ok());
        assert!(matches!(
            store.delete_venue(venue.id).await,
            Err(DirectoryError::Conflict(_))
        ));
        assert!(matches!(
            store.delete_venue(VenueId::new(77)).await,
            Err(DirectoryError::VenueNotFound(_))
        ));
    }

    #[tokio::test]
    async fn concurrent_creates_get_distinct_ids() {
        let store = Arc::new(MemoryStore::new());
        let mut handles = Vec::new();
        for i in 0..16 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.create_venue(&profile(&format!("Venue {i}"))).await
            }));
        }
        let mut ids = Vec::new();
        for handle in handles {
            let Ok(Ok(venue)) = handle.await else {
                panic!("task failed");
            };
            ids.push(venue.id);
        }
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 16);
    }
}
