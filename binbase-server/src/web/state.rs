//! Application state for the web layer.

use std::sync::Arc;

use crate::lookup::LookupService;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Cache-backed BIN lookup
    pub lookup: Arc<LookupService>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(lookup: LookupService) -> Self {
        Self {
            lookup: Arc::new(lookup),
        }
    }
}
