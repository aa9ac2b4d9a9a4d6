//! Venue entity, its validated profile, and the raw create form.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::form;
use super::genres::Genres;
use super::ids::VenueId;
use crate::error::DirectoryError;

/// Everything about a venue except its identity.
///
/// Produced by [`VenueForm::validate`]; immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct VenueProfile {
    /// Display name.
    pub name: String,
    /// City the venue is in.
    pub city: String,
    /// State or region code (e.g. `"CA"`).
    pub state: String,
    /// Street address.
    pub address: String,
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
    /// Whether the venue is looking for artists.
    pub seeking_talent: bool,
    /// Free-text description of what the venue is looking for.
    pub seeking_description: Option<String>,
}

/// A stored venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Venue {
    /// Store-generated identifier.
    pub id: VenueId,
    /// Venue attributes.
    #[serde(flatten)]
    pub profile: VenueProfile,
}

/// Raw, unvalidated venue fields as submitted by a client.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct VenueForm {
    /// Display name (required).
    pub name: Option<String>,
    /// City (required).
    pub city: Option<String>,
    /// State (required).
    pub state: Option<String>,
    /// Street address (required).
    pub address: Option<String>,
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
    /// Looking for talent.
    pub seeking_talent: bool,
    /// What kind of talent.
    pub seeking_description: Option<String>,
}

impl VenueForm {
    /// Checks required fields and link formats.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Validation`] naming the first offending
    /// field.
    pub fn validate(&self) -> Result<VenueProfile, DirectoryError> {
        Ok(VenueProfile {
            name: form::required("name", self.name.as_deref())?,
            city: form::required("city", self.city.as_deref())?,
            state: form::required("state", self.state.as_deref())?,
            address: form::required("address", self.address.as_deref())?,
            genres: form::genres(&self.genres)?,
            phone: form::optional(self.phone.as_deref()),
            image_link: form::optional_link("image_link", self.image_link.as_deref())?,
            facebook_link: form::optional_link("facebook_link", self.facebook_link.as_deref())?,
            website: form::optional_link("website", self.website.as_deref())?,
            seeking_talent: self.seeking_talent,
            seeking_description: form::optional(self.seeking_description.as_deref()),
        })
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn musical_hop() -> VenueForm {
        VenueForm {
            name: Some("The Musical Hop".to_string()),
            city: Some("San Francisco".to_string()),
            state: Some("CA".to_string()),
            address: Some("1015 Folsom Street".to_string()),
            genres: vec!["Jazz".to_string(), "Reggae".to_string()],
            phone: Some("123-123-1234".to_string()),
            website: Some("https://www.themusicalhop.com".to_string()),
            seeking_talent: true,
            ..VenueForm::default()
        }
    }

    #[test]
    fn valid_form_produces_profile() {
        let Ok(profile) = musical_hop().validate() else {
            panic!("form should validate");
        };
        assert_eq!(profile.name, "The Musical Hop");
        assert_eq!(profile.genres.as_slice(), ["Jazz", "Reggae"]);
        assert!(profile.seeking_talent);
        assert_eq!(profile.facebook_link, None);
    }

    #[test]
    fn missing_name_is_rejected() {
        let form = VenueForm {
            name: None,
            ..musical_hop()
        };
        let Err(DirectoryError::Validation(msg)) = form.validate() else {
            panic!("expected validation error");
        };
        assert!(msg.contains("name"));
    }

    #[test]
    fn missing_address_is_rejected() {
        let form = VenueForm {
            address: Some(" ".to_string()),
            ..musical_hop()
        };
        assert!(matches!(form.validate(), Err(DirectoryError::Validation(_))));
    }

    #[test]
    fn bad_facebook_link_is_rejected() {
        let form = VenueForm {
            facebook_link: Some("facebook.com/TheMusicalHop".to_string()),
            ..musical_hop()
        };
        assert!(matches!(form.validate(), Err(DirectoryError::Validation(_))));
    }

    #[test]
    fn form_deserializes_with_missing_fields() {
        let Ok(form) = serde_json::from_str::<VenueForm>(r#"{"name":"Dueling Pianos Bar"}"#)
        else {
            panic!("deserialization failed");
        };
        assert_eq!(form.name.as_deref(), Some("Dueling Pianos Bar"));
        assert!(form.genres.is_empty());
        assert!(!form.seeking_talent);
    }
}
