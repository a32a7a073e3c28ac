//! Application state for the HTTP server.

use std::sync::Arc;

use crate::services::PlantIdentifier;
use crate::upstream::ObservationSource;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Where plant observations come from
    pub source: Arc<dyn ObservationSource>,
    /// Photo identification service
    pub identifier: PlantIdentifier,
}

impl AppState {
    pub fn new(source: Arc<dyn ObservationSource>, identifier: PlantIdentifier) -> Self {
        Self { source, identifier }
    }
}
