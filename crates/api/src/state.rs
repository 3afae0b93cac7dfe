use std::sync::Arc;

use inci_core::store::VolunteerStore;

use crate::config::ServerConfig;
use crate::storage::UploadStorage;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything inside is behind `Arc` or already `Clone`.
#[derive(Clone)]
pub struct AppState {
    /// Volunteer data store (PostgreSQL or in-memory).
    pub store: Arc<dyn VolunteerStore>,
    /// Which store backs this process, reported by `/health`.
    pub store_backend: &'static str,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Evidence file storage on local disk.
    pub uploads: UploadStorage,
}

impl AppState {
    pub fn new(
        store: Arc<dyn VolunteerStore>,
        store_backend: &'static str,
        config: Arc<ServerConfig>,
    ) -> Self {
        let uploads = UploadStorage::new(config.upload_dir.clone());
        Self {
            store,
            store_backend,
            config,
            uploads,
        }
    }

    /// Borrow the store as a trait object for the service layer.
    pub fn store(&self) -> &dyn VolunteerStore {
        self.store.as_ref()
    }
}
