//! Object store backends.
//!
//! Two implementations of [`folio_core::storage::ObjectStore`]:
//!
//! - [`LocalObjectStore`] writes under a directory on disk; the API server
//!   serves that directory at [`LOCAL_ROUTE_PREFIX`].
//! - [`RemoteObjectStore`] talks to a hosted storage REST API using the
//!   service URL and public key from the environment.

pub mod config;
pub mod local;
pub mod remote;

use std::sync::Arc;

use folio_core::storage::{ObjectStore, StorageError};

pub use config::{BackendConfig, StorageConfig};
pub use local::{LocalObjectStore, LOCAL_ROUTE_PREFIX};
pub use remote::RemoteObjectStore;

/// Build the configured backend.
pub fn connect(config: &StorageConfig) -> Result<Arc<dyn ObjectStore>, StorageError> {
    match &config.backend {
        BackendConfig::Local {
            root,
            public_base_url,
        } => {
            tracing::info!(root = %root.display(), "Using local object storage");
            Ok(Arc::new(LocalObjectStore::new(root.clone(), public_base_url)))
        }
        BackendConfig::Remote { url, public_key } => {
            tracing::info!(url = %url, "Using remote object storage");
            Ok(Arc::new(RemoteObjectStore::new(url, public_key)?))
        }
    }
}
