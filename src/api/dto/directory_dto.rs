//! Query parameters and list items shared by the directory endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Artist, ArtistId, SearchQuery};

/// Evaluation instant override for time-dependent reads.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AtParams {
    /// RFC 3339 instant to classify shows against. Defaults to now.
    #[serde(default)]
    pub at: Option<DateTime<Utc>>,
}

impl AtParams {
    /// The requested instant, or the current time.
    #[must_use]
    pub fn instant(&self) -> DateTime<Utc> {
        self.at.unwrap_or_else(Utc::now)
    }
}

/// Search query string for `/venues/search` and `/artists/search`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Case-insensitive substring of the name. Empty matches everything.
    #[serde(default)]
    pub search_term: String,
    /// Genre the entity must carry.
    #[serde(default)]
    pub genre: Option<String>,
    /// RFC 3339 instant to count upcoming shows against. Defaults to now.
    #[serde(default)]
    pub at: Option<DateTime<Utc>>,
}

impl SearchParams {
    /// Splits into the engine query and the evaluation instant.
    #[must_use]
    pub fn into_query(self) -> (SearchQuery, DateTime<Utc>) {
        let query = SearchQuery {
            search_term: self.search_term,
            genre: self.genre,
        };
        (query, self.at.unwrap_or_else(Utc::now))
    }
}

/// One row of the artist index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ArtistListItem {
    /// Artist id.
    pub id: ArtistId,
    /// Display name.
    pub name: String,
}

impl From<Artist> for ArtistListItem {
    fn from(artist: Artist) -> Self {
        Self {
            id: artist.id,
            name: artist.profile.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::testing::{artist, utc};

    #[test]
    fn search_params_default_to_match_all() {
        let (query, _) = SearchParams::default().into_query();
        assert_eq!(query, SearchQuery::default());
    }

    #[test]
    fn explicit_instant_is_kept() {
        let at = utc(2019, 5, 21, 21, 30, 0);
        let params = AtParams { at: Some(at) };
        assert_eq!(params.instant(), at);
    }

    #[test]
    fn artist_list_item_keeps_id_and_name() {
        let item = ArtistListItem::from(artist(6, "The Wild Sax Band"));
        assert_eq!(item.id, ArtistId::new(6));
        assert_eq!(item.name, "The Wild Sax Band");
    }
}
