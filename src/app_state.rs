//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::service::DirectoryService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Directory service for all business logic.
    pub directory: Arc<DirectoryService>,
}

impl AppState {
    /// Wraps a service for sharing across handlers.
    #[must_use]
    pub fn new(directory: DirectoryService) -> Self {
        Self {
            directory: Arc::new(directory),
        }
    }
}
