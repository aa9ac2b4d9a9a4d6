//! Fixtures shared by the domain unit tests.

#![allow(clippy::panic)]

use chrono::{DateTime, TimeZone, Utc};

use super::{
    Artist, ArtistId, ArtistProfile, Genres, Show, ShowId, Venue, VenueId, VenueProfile,
};

/// Builds a UTC instant, panicking on an impossible date.
pub(crate) fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
    let Some(dt) = Utc.with_ymd_and_hms(y, mo, d, h, mi, s).single() else {
        panic!("invalid fixture date");
    };
    dt
}

/// Reference "now" used by most tests: 2030-06-15 12:00:00 UTC.
pub(crate) fn now() -> DateTime<Utc> {
    utc(2030, 6, 15, 12, 0, 0)
}

pub(crate) fn venue(id: i64, name: &str, city: &str, state: &str) -> Venue {
    Venue {
        id: VenueId::new(id),
        profile: VenueProfile {
            name: name.to_string(),
            city: city.to_string(),
            state: state.to_string(),
            address: format!("{id} Main Street"),
            genres: Genres::new(["Jazz", "Folk"]),
            phone: None,
            image_link: Some(format!("https://img.example.com/venue/{id}.jpg")),
            facebook_link: None,
            website: None,
            seeking_talent: false,
            seeking_description: None,
        },
    }
}

pub(crate) fn artist(id: i64, name: &str) -> Artist {
    Artist {
        id: ArtistId::new(id),
        profile: ArtistProfile {
            name: name.to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            genres: Genres::new(["Rock n Roll"]),
            phone: None,
            image_link: Some(format!("https://img.example.com/artist/{id}.jpg")),
            facebook_link: None,
            website: None,
            seeking_venue: true,
            seeking_description: None,
        },
    }
}

pub(crate) fn show(id: i64, venue: i64, artist: i64, start: Option<DateTime<Utc>>) -> Show {
    Show {
        id: ShowId::new(id),
        venue_id: VenueId::new(venue),
        artist_id: ArtistId::new(artist),
        start_time: start,
    }
}
