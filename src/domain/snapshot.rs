//! Display-ready summaries and detail views built from entities and their
//! partitioned shows.
//!
//! Every view is a statically shaped value assembled here; stored entities
//! are never mutated to carry derived fields. Counts are always taken from
//! the lists they describe, so `*_count == *_shows.len()` holds by
//! construction.

use std::collections::HashMap;
use std::hash::Hash;

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::ids::{ArtistId, ShowId, VenueId};
use super::partition::{Timing, partition, upcoming_count};
use super::{Artist, Show, Venue};

/// Lightweight venue summary for listings and search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct VenueSnapshot {
    /// Venue identifier.
    pub id: VenueId,
    /// Venue name.
    pub name: String,
    /// Number of shows at this venue starting after the evaluation instant.
    pub upcoming_show_count: usize,
}

impl VenueSnapshot {
    /// Builds the snapshot from the venue's own shows.
    #[must_use]
    pub fn build(venue: &Venue, shows: &[Show], now: DateTime<Utc>) -> Self {
        Self {
            id: venue.id,
            name: venue.profile.name.clone(),
            upcoming_show_count: upcoming_count(shows, now),
        }
    }
}

/// Lightweight artist summary for listings and search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ArtistSnapshot {
    /// Artist identifier.
    pub id: ArtistId,
    /// Artist name.
    pub name: String,
    /// Number of shows by this artist starting after the evaluation instant.
    pub upcoming_show_count: usize,
}

impl ArtistSnapshot {
    /// Builds the snapshot from the artist's own shows.
    #[must_use]
    pub fn build(artist: &Artist, shows: &[Show], now: DateTime<Utc>) -> Self {
        Self {
            id: artist.id,
            name: artist.profile.name.clone(),
            upcoming_show_count: upcoming_count(shows, now),
        }
    }
}

/// One show on a venue page, seen from the artist side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ArtistSummary {
    /// Performing artist.
    pub artist_id: ArtistId,
    /// Artist name.
    pub artist_name: String,
    /// Artist image URL.
    pub artist_image_link: Option<String>,
    /// Show start time.
    pub start_time: DateTime<Utc>,
}

/// One show on an artist page, seen from the venue side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct VenueSummary {
    /// Hosting venue.
    pub venue_id: VenueId,
    /// Venue name.
    pub venue_name: String,
    /// Venue image URL.
    pub venue_image_link: Option<String>,
    /// Show start time.
    pub start_time: DateTime<Utc>,
}

/// Full venue page: profile plus past and upcoming shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct VenueDetailView {
    /// Venue identifier.
    pub id: VenueId,
    /// Venue name.
    pub name: String,
    /// City.
    pub city: String,
    /// State.
    pub state: String,
    /// Street address.
    pub address: String,
    /// Genre tags.
    pub genres: Vec<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// Image URL.
    pub image_link: Option<String>,
    /// Facebook page URL.
    pub facebook_link: Option<String>,
    /// Website URL.
    pub website: Option<String>,
    /// Looking for talent.
    pub seeking_talent: bool,
    /// What kind of talent.
    pub seeking_description: Option<String>,
    /// Shows already started, latest first.
    pub past_shows: Vec<ArtistSummary>,
    /// Length of `past_shows`.
    pub past_shows_count: usize,
    /// Shows still to come, latest first.
    pub upcoming_shows: Vec<ArtistSummary>,
    /// Length of `upcoming_shows`.
    pub upcoming_shows_count: usize,
}

impl VenueDetailView {
    /// Assembles the view from the venue's shows and the artists they
    /// reference.
    ///
    /// Shows whose artist is missing from `artists` are left out and
    /// logged.
    #[must_use]
    pub fn build(
        venue: &Venue,
        shows: &[Show],
        artists: &HashMap<ArtistId, Artist>,
        now: DateTime<Utc>,
    ) -> Self {
        let split = partition(shows, now);
        let side = |timing| {
            summarize(
                split.bucket(timing),
                |s| s.artist_id,
                artists,
                |artist: &Artist, start_time| ArtistSummary {
                    artist_id: artist.id,
                    artist_name: artist.profile.name.clone(),
                    artist_image_link: artist.profile.image_link.clone(),
                    start_time,
                },
            )
        };
        let past_shows = side(Timing::Past);
        let upcoming_shows = side(Timing::Upcoming);

        let p = &venue.profile;
        Self {
            id: venue.id,
            name: p.name.clone(),
            city: p.city.clone(),
            state: p.state.clone(),
            address: p.address.clone(),
            genres: p.genres.as_slice().to_vec(),
            phone: p.phone.clone(),
            image_link: p.image_link.clone(),
            facebook_link: p.facebook_link.clone(),
            website: p.website.clone(),
            seeking_talent: p.seeking_talent,
            seeking_description: p.seeking_description.clone(),
            past_shows_count: past_shows.len(),
            past_shows,
            upcoming_shows_count: upcoming_shows.len(),
            upcoming_shows,
        }
    }
}

/// Full artist page: profile plus past and upcoming shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ArtistDetailView {
    /// Artist identifier.
    pub id: ArtistId,
    /// Artist name.
    pub name: String,
    /// City.
    pub city: String,
    /// State.
    pub state: String,
    /// Genre tags.
    pub genres: Vec<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// Image URL.
    pub image_link: Option<String>,
    /// Facebook page URL.
    pub facebook_link: Option<String>,
    /// Website URL.
    pub website: Option<String>,
    /// Looking for venues.
    pub seeking_venue: bool,
    /// What kind of venue.
    pub seeking_description: Option<String>,
    /// Shows already started, latest first.
    pub past_shows: Vec<VenueSummary>,
    /// Length of `past_shows`.
    pub past_shows_count: usize,
    /// Shows still to come, latest first.
    pub upcoming_shows: Vec<VenueSummary>,
    /// Length of `upcoming_shows`.
    pub upcoming_shows_count: usize,
}

impl ArtistDetailView {
    /// Assembles the view from the artist's shows and the venues they
    /// reference.
    #[must_use]
    pub fn build(
        artist: &Artist,
        shows: &[Show],
        venues: &HashMap<VenueId, Venue>,
        now: DateTime<Utc>,
    ) -> Self {
        let split = partition(shows, now);
        let side = |timing| {
            summarize(
                split.bucket(timing),
                |s| s.venue_id,
                venues,
                |venue: &Venue, start_time| VenueSummary {
                    venue_id: venue.id,
                    venue_name: venue.profile.name.clone(),
                    venue_image_link: venue.profile.image_link.clone(),
                    start_time,
                },
            )
        };
        let past_shows = side(Timing::Past);
        let upcoming_shows = side(Timing::Upcoming);

        let p = &artist.profile;
        Self {
            id: artist.id,
            name: p.name.clone(),
            city: p.city.clone(),
            state: p.state.clone(),
            genres: p.genres.as_slice().to_vec(),
            phone: p.phone.clone(),
            image_link: p.image_link.clone(),
            facebook_link: p.facebook_link.clone(),
            website: p.website.clone(),
            seeking_venue: p.seeking_venue,
            seeking_description: p.seeking_description.clone(),
            past_shows_count: past_shows.len(),
            past_shows,
            upcoming_shows_count: upcoming_shows.len(),
            upcoming_shows,
        }
    }
}

/// One row of the global show listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ShowListing {
    /// Show identifier.
    pub show_id: ShowId,
    /// Hosting venue.
    pub venue_id: VenueId,
    /// Venue name.
    pub venue_name: String,
    /// Venue image URL.
    pub venue_image_link: Option<String>,
    /// Performing artist.
    pub artist_id: ArtistId,
    /// Artist name.
    pub artist_name: String,
    /// Artist image URL.
    pub artist_image_link: Option<String>,
    /// Show start time, if known.
    pub start_time: Option<DateTime<Utc>>,
}

impl ShowListing {
    /// Joins every show with its venue and artist, keeping input order.
    ///
    /// No past/upcoming split is applied. Shows whose venue or artist is
    /// missing from the maps are left out and logged.
    #[must_use]
    pub fn build_all(
        shows: &[Show],
        venues: &HashMap<VenueId, Venue>,
        artists: &HashMap<ArtistId, Artist>,
    ) -> Vec<Self> {
        shows
            .iter()
            .filter_map(|show| {
                let (Some(venue), Some(artist)) =
                    (venues.get(&show.venue_id), artists.get(&show.artist_id))
                else {
                    tracing::warn!(show_id = %show.id, "show references a missing entity, skipped");
                    return None;
                };
                Some(Self {
                    show_id: show.id,
                    venue_id: venue.id,
                    venue_name: venue.profile.name.clone(),
                    venue_image_link: venue.profile.image_link.clone(),
                    artist_id: artist.id,
                    artist_name: artist.profile.name.clone(),
                    artist_image_link: artist.profile.image_link.clone(),
                    start_time: show.start_time,
                })
            })
            .collect()
    }
}

/// Maps one partition bucket to summaries of the counterpart entity.
fn summarize<K, E, S>(
    bucket: &[Show],
    key: impl Fn(&Show) -> K,
    lookup: &HashMap<K, E>,
    make: impl Fn(&E, DateTime<Utc>) -> S,
) -> Vec<S>
where
    K: Eq + Hash,
{
    bucket
        .iter()
        .filter_map(|show| {
            let start_time = show.start_time?;
            match lookup.get(&key(show)) {
                Some(entity) => Some(make(entity, start_time)),
                None => {
                    tracing::warn!(show_id = %show.id, "show references a missing entity, skipped");
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::domain::testing::{artist, now, show, venue};

    fn artists() -> HashMap<ArtistId, Artist> {
        [artist(1, "Guns N Petals"), artist(2, "Matt Quevedo")]
            .into_iter()
            .map(|a| (a.id, a))
            .collect()
    }

    fn venues() -> HashMap<VenueId, Venue> {
        [
            venue(1, "The Musical Hop", "San Francisco", "CA"),
            venue(2, "The Dueling Pianos Bar", "New York", "NY"),
        ]
        .into_iter()
        .map(|v| (v.id, v))
        .collect()
    }

    fn hop_shows() -> Vec<Show> {
        let t = now();
        vec![
            show(1, 1, 1, Some(t - Duration::days(10))),
            show(2, 1, 2, Some(t + Duration::days(1))),
            show(3, 1, 1, Some(t + Duration::days(5))),
            show(4, 1, 2, None),
        ]
    }

    #[test]
    fn snapshot_counts_upcoming_bucket() {
        let hop = venue(1, "The Musical Hop", "San Francisco", "CA");
        let shows = hop_shows();
        for at in [now() - Duration::days(30), now(), now() + Duration::days(3)] {
            let snap = VenueSnapshot::build(&hop, &shows, at);
            assert_eq!(snap.upcoming_show_count, partition(&shows, at).upcoming.len());
        }
        assert_eq!(VenueSnapshot::build(&hop, &shows, now()).upcoming_show_count, 2);
    }

    #[test]
    fn artist_snapshot_mirrors_venue_snapshot() {
        let petals = artist(1, "Guns N Petals");
        let shows: Vec<Show> = hop_shows()
            .into_iter()
            .filter(|s| s.artist_id == petals.id)
            .collect();
        let snap = ArtistSnapshot::build(&petals, &shows, now());
        assert_eq!(snap.name, "Guns N Petals");
        assert_eq!(snap.upcoming_show_count, 1);
    }

    #[test]
    fn venue_detail_counts_match_lists() {
        let hop = venue(1, "The Musical Hop", "San Francisco", "CA");
        let view = VenueDetailView::build(&hop, &hop_shows(), &artists(), now());

        assert_eq!(view.past_shows_count, view.past_shows.len());
        assert_eq!(view.upcoming_shows_count, view.upcoming_shows.len());
        assert_eq!(view.past_shows_count, 1);
        assert_eq!(view.upcoming_shows_count, 2);
        assert_eq!(view.genres, vec!["Jazz".to_string(), "Folk".to_string()]);
        assert_eq!(view.address, "1 Main Street");
    }

    #[test]
    fn venue_detail_lists_latest_first_with_artist_fields() {
        let hop = venue(1, "The Musical Hop", "San Francisco", "CA");
        let view = VenueDetailView::build(&hop, &hop_shows(), &artists(), now());
        let Some(first) = view.upcoming_shows.first() else {
            panic!("expected upcoming shows");
        };
        assert_eq!(first.artist_name, "Guns N Petals");
        assert_eq!(first.start_time, now() + Duration::days(5));
        assert_eq!(
            first.artist_image_link.as_deref(),
            Some("https://img.example.com/artist/1.jpg")
        );
    }

    #[test]
    fn detail_skips_shows_with_unknown_counterpart_and_stays_consistent() {
        let hop = venue(1, "The Musical Hop", "San Francisco", "CA");
        let mut shows = hop_shows();
        shows.push(show(9, 1, 99, Some(now() + Duration::days(2))));
        let view = VenueDetailView::build(&hop, &shows, &artists(), now());
        assert_eq!(view.upcoming_shows_count, 2);
        assert_eq!(view.upcoming_shows_count, view.upcoming_shows.len());
    }

    #[test]
    fn artist_detail_uses_venue_fields() {
        let petals = artist(1, "Guns N Petals");
        let t = now();
        let shows = vec![
            show(1, 1, 1, Some(t - Duration::days(3))),
            show(2, 2, 1, Some(t + Duration::days(3))),
        ];
        let view = ArtistDetailView::build(&petals, &shows, &venues(), t);
        assert_eq!(view.past_shows_count, view.past_shows.len());
        assert_eq!(view.upcoming_shows_count, view.upcoming_shows.len());
        let Some(upcoming) = view.upcoming_shows.first() else {
            panic!("expected an upcoming show");
        };
        assert_eq!(upcoming.venue_name, "The Dueling Pianos Bar");
        assert!(view.seeking_venue);
    }

    #[test]
    fn show_listing_joins_both_sides_in_input_order() {
        let t = now();
        let shows = vec![
            show(2, 2, 2, Some(t + Duration::days(1))),
            show(1, 1, 1, Some(t - Duration::days(1))),
        ];
        let rows = ShowListing::build_all(&shows, &venues(), &artists());
        let ids: Vec<i64> = rows.iter().map(|r| r.show_id.get()).collect();
        assert_eq!(ids, vec![2, 1]);
        let Some(first) = rows.first() else {
            panic!("expected rows");
        };
        assert_eq!(first.venue_name, "The Dueling Pianos Bar");
        assert_eq!(first.artist_name, "Matt Quevedo");
    }

    #[test]
    fn show_listing_keeps_shows_without_start_time() {
        let rows = ShowListing::build_all(&[show(1, 1, 1, None)], &venues(), &artists());
        assert_eq!(rows.len(), 1);
        assert!(rows.iter().all(|r| r.start_time.is_none()));
    }
}
