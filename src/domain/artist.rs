//! Artist entity, its validated profile, and the raw create form.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::form;
use super::genres::Genres;
use super::ids::ArtistId;
use crate::error::DirectoryError;

/// Everything about an artist except its identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ArtistProfile {
    /// Display name.
    pub name: String,
    /// Home city.
    pub city: String,
    /// Home state or region code.
    pub state: String,
    /// Genre tags.
    pub genres: Genres,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Image URL.
    pub image_link: Option<String>,
    /// Facebook page URL.
    pub facebook_link: Option<String>,
    /// Website URL.
    pub website: Option<String>,
    /// Whether the artist is looking for venues.
    pub seeking_venue: bool,
    /// Free-text description of what the artist is looking for.
    pub seeking_description: Option<String>,
}

/// A stored artist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Artist {
    /// Store-generated identifier.
    pub id: ArtistId,
    /// Artist attributes.
    #[serde(flatten)]
    pub profile: ArtistProfile,
}

/// Raw, unvalidated artist fields as submitted by a client.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct ArtistForm {
    /// Display name (required).
    pub name: Option<String>,
    /// City (required).
    pub city: Option<String>,
    /// State (required).
    pub state: Option<String>,
    /// Genre tags (at least one).
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
}

impl ArtistForm {
    /// Checks required fields and link formats.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Validation`] naming the first offending
    /// field.
    pub fn validate(&self) -> Result<ArtistProfile, DirectoryError> {
        Ok(ArtistProfile {
            name: form::required("name", self.name.as_deref())?,
            city: form::required("city", self.city.as_deref())?,
            state: form::required("state", self.state.as_deref())?,
            genres: form::genres(&self.genres)?,
            phone: form::optional(self.phone.as_deref()),
            image_link: form::optional_link("image_link", self.image_link.as_deref())?,
            facebook_link: form::optional_link("facebook_link", self.facebook_link.as_deref())?,
            website: form::optional_link("website", self.website.as_deref())?,
            seeking_venue: self.seeking_venue,
            seeking_description: form::optional(self.seeking_description.as_deref()),
        })
    }
}
