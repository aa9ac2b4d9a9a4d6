//! Domain layer: entities, validation, and the query engines.
//!
//! Everything in here is pure. The temporal partitioner, snapshot builder,
//! grouping engine and search engine only read the entities and the
//! evaluation instant they are given, so they can run concurrently
//! without coordination.

pub mod artist;
mod form;
pub mod genres;
pub mod grouping;
pub mod ids;
pub mod partition;
pub mod search;
pub mod show;
pub mod snapshot;
pub mod venue;

#[cfg(test)]
pub(crate) mod testing;

pub use artist::{Artist, ArtistForm, ArtistProfile};
pub use genres::Genres;
pub use grouping::{LocationGroup, group_venues_by_location};
pub use ids::{ArtistId, ShowId, VenueId};
pub use partition::{Partition, Timing, classify, partition, partition_strict};
pub use search::{SearchQuery, SearchResults, search_artists, search_venues};
pub use show::{NewShow, Show, ShowForm};
pub use snapshot::{
    ArtistDetailView, ArtistSnapshot, ArtistSummary, ShowListing, VenueDetailView, VenueSnapshot,
    VenueSummary,
};
pub use venue::{Venue, VenueForm, VenueProfile};
