//! Case-insensitive name search over venues and artists.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::genres::{Genres, fold_case};
use super::snapshot::{ArtistSnapshot, VenueSnapshot};
use super::{Artist, Venue};

/// What to search for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchQuery {
    /// Substring to look for in names, matched as given apart from case.
    /// Empty or whitespace-only matches everything.
    #[serde(default)]
    pub search_term: String,
    /// Optional genre the entity must carry.
    #[serde(default)]
    pub genre: Option<String>,
}

impl SearchQuery {
    /// Query matching names containing `term`.
    pub fn term(term: impl Into<String>) -> Self {
        Self {
            search_term: term.into(),
            genre: None,
        }
    }

    /// Adds a genre filter.
    #[must_use]
    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    fn matches(&self, name: &str, genres: &Genres) -> bool {
        let name_ok = self.search_term.trim().is_empty()
            || fold_case(name).contains(&fold_case(&self.search_term));
        let genre_ok = match self.genre.as_deref().map(str::trim) {
            Some(tag) if !tag.is_empty() => genres.contains(tag),
            _ => true,
        };
        name_ok && genre_ok
    }
}

/// Search hits with their count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct SearchResults<T> {
    /// Number of matching entities.
    pub count: usize,
    /// One snapshot per match, in input order.
    pub results: Vec<T>,
}

impl<T> SearchResults<T> {
    fn from_results(results: Vec<T>) -> Self {
        Self {
            count: results.len(),
            results,
        }
    }
}

/// Venues whose name contains the term, ignoring case.
pub fn search_venues<F>(
    venues: &[Venue],
    query: &SearchQuery,
    mut snapshot: F,
) -> SearchResults<VenueSnapshot>
where
    F: FnMut(&Venue) -> VenueSnapshot,
{
    SearchResults::from_results(
        venues
            .iter()
            .filter(|v| query.matches(&v.profile.name, &v.profile.genres))
            .map(|v| snapshot(v))
            .collect(),
    )
}

/// Artists whose name contains the term, ignoring case.
pub fn search_artists<F>(
    artists: &[Artist],
    query: &SearchQuery,
    mut snapshot: F,
) -> SearchResults<ArtistSnapshot>
where
    F: FnMut(&Artist) -> ArtistSnapshot,
{
    SearchResults::from_results(
        artists
            .iter()
            .filter(|a| query.matches(&a.profile.name, &a.profile.genres))
            .map(|a| snapshot(a))
            .collect(),
    )
}
