//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::BundleService;
use crate::domain::repositories::BundleRepository;

/// Bundle service over whichever storage backend was configured.
pub type DynBundleService = BundleService<dyn BundleRepository>;

#[derive(Clone)]
pub struct AppState {
    pub bundle_service: Arc<DynBundleService>,
}

impl AppState {
    /// Builds the state around a storage backend.
    pub fn new(repository: Arc<dyn BundleRepository>) -> Self {
        Self {
            bundle_service: Arc::new(BundleService::new(repository)),
        }
    }
}
