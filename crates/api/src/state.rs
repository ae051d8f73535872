use std::sync::Arc;

use folio_core::storage::ObjectStore;
use folio_storage::StorageConfig;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: everything except the pool sits behind an `Arc`, and
/// the pool is itself reference counted.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: folio_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Object store holding project images and CV files.
    pub storage: Arc<dyn ObjectStore>,
    /// Backend selection and bucket names.
    pub storage_config: Arc<StorageConfig>,
}

impl AppState {
    pub fn image_bucket(&self) -> &str {
        &self.storage_config.image_bucket
    }

    pub fn cv_bucket(&self) -> &str {
        &self.storage_config.cv_bucket
    }
}
