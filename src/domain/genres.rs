//! Genre tags attached to venues and artists.
//!
//! Persisted as one comma-delimited column, but matched as a set: order
//! and letter case never affect membership.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Separator used in the persisted representation.
pub const GENRE_DELIMITER: char = ',';

/// Case folding shared by genre matching and name search.
pub(crate) fn fold_case(s: &str) -> String {
    s.to_lowercase()
}

/// De-duplicated list of genre tags.
///
/// Keeps first-seen order for display. Two tags are the same genre when
/// they are equal ignoring case; the first spelling wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
#[schema(value_type = Vec<String>)]
pub struct Genres(Vec<String>);

impl Genres {
    /// Builds a genre list from raw tags, trimming whitespace and dropping
    /// blanks and case-insensitive duplicates.
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<String> = Vec::new();
        let mut seen: Vec<String> = Vec::new();
        for tag in tags {
            let tag = tag.as_ref().trim();
            let key = fold_case(tag);
            if tag.is_empty() || seen.contains(&key) {
                continue;
            }
            seen.push(key);
            out.push(tag.to_string());
        }
        Self(out)
    }

    /// Parses the persisted comma-delimited representation.
    #[must_use]
    pub fn parse_delimited(raw: &str) -> Self {
        Self::new(raw.split(GENRE_DELIMITER))
    }

    /// Renders the persisted comma-delimited representation.
    #[must_use]
    pub fn to_delimited(&self) -> String {
        self.0.join(&GENRE_DELIMITER.to_string())
    }

    /// Returns `true` if `tag` is one of the genres, ignoring case.
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        let tag = fold_case(tag.trim());
        self.0.iter().any(|t| fold_case(t) == tag)
    }

    /// Tags in display order.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Number of distinct genres.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no genres.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for Genres {
    fn from(tags: Vec<String>) -> Self {
        Self::new(tags)
    }
}

impl From<Genres> for Vec<String> {
    fn from(genres: Genres) -> Self {
        genres.0
    }
}

impl fmt::Display for Genres {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_and_drops_blanks() {
        let genres = Genres::parse_delimited(" Jazz, ,Reggae ,Swing,");
        assert_eq!(genres.as_slice(), ["Jazz", "Reggae", "Swing"]);
    }

    #[test]
    fn duplicates_are_case_insensitive() {
        let genres = Genres::new(["Rock n Roll", "rock n roll", "Folk"]);
        assert_eq!(genres.len(), 2);
        assert_eq!(genres.as_slice(), ["Rock n Roll", "Folk"]);
    }

    #[test]
    fn delimited_form_round_trips() {
        let genres = Genres::new(["Jazz", "Classical", "Folk"]);
        assert_eq!(Genres::parse_delimited(&genres.to_delimited()), genres);
    }

    #[test]
    fn membership_ignores_case() {
        let genres = Genres::new(["Jazz", "Swing"]);
        assert!(genres.contains("jazz"));
        assert!(genres.contains(" SWING "));
        assert!(!genres.contains("Folk"));
    }

    #[test]
    fn non_ascii_tags_fold_like_names() {
        let genres = Genres::new(["Électro", "électro", "Ünderground"]);
        assert_eq!(genres.as_slice(), ["Électro", "Ünderground"]);
        assert!(genres.contains("ÉLECTRO"));
        assert!(genres.contains("ünderground"));
    }
}
