//! Service layer: business logic orchestration.
//!
//! [`DirectoryService`] validates input, persists through an injected
//! [`crate::persistence::EntityStore`], and runs the partition, snapshot,
//! grouping and search engines over what it loads.

pub mod directory_service;

pub use directory_service::DirectoryService;
