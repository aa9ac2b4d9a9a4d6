//! # gigboard
//!
//! Booking directory that connects performing artists with venues.
//!
//! Venues, artists and the shows that book one at the other are kept in an
//! [`persistence::EntityStore`]. Every read that depends on time is derived
//! on demand: shows are partitioned into past and upcoming against an
//! explicit evaluation instant, and nothing time-dependent is stored.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, JSON)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── DirectoryService (service/)
//!     │
//!     ├── Partitioner, Snapshots, Grouping, Search (domain/)
//!     │
//!     └── EntityStore (persistence/): SQLite or in-memory
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
