//! Data Transfer Objects for REST request/response serialization.
//!
//! Entities, forms and engine outputs serialize directly from the domain
//! types; this module only holds the query-string shapes and the few
//! responses that have no domain counterpart.

pub mod directory_dto;

pub use directory_dto::*;
