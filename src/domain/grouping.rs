//! Grouping of venues by location for the directory listing.

use serde::Serialize;
use utoipa::ToSchema;

use super::Venue;
use super::snapshot::VenueSnapshot;

/// All venues sharing one `(city, state)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct LocationGroup {
    /// City shared by every venue in the group.
    pub city: String,
    /// State shared by every venue in the group.
    pub state: String,
    /// Venue snapshots in input order.
    pub venues: Vec<VenueSnapshot>,
}

/// Groups venues by exact, case-sensitive `(city, state)`.
///
/// Groups come out in the order their key is first seen, and venues keep
/// their input order inside a group, so the same input always yields the
/// same output.
pub fn group_venues_by_location<F>(venues: &[Venue], mut snapshot: F) -> Vec<LocationGroup>
where
    F: FnMut(&Venue) -> VenueSnapshot,
{
    let mut groups: Vec<LocationGroup> = Vec::new();
    for venue in venues {
        let (city, state) = (&venue.profile.city, &venue.profile.state);
        let snap = snapshot(venue);
        match groups
            .iter_mut()
            .find(|g| &g.city == city && &g.state == state)
        {
            Some(group) => group.venues.push(snap),
            None => groups.push(LocationGroup {
                city: city.clone(),
                state: state.clone(),
                venues: vec![snap],
            }),
        }
    }
    groups
}
