//! Object storage abstraction.
//!
//! Project images and CV files live in buckets of an object store. The
//! handlers only ever need four things from it: write an object, delete a
//! batch of objects, derive the public URL of an object, and map such a URL
//! back to its key. Backends live in the `folio-storage` crate; the
//! in-process [`MemoryObjectStore`] backs tests.

mod keys;
mod memory;

use async_trait::async_trait;

pub use keys::{
    cv_object_key, image_object_key, sanitize_file_name, validate_key, IMAGE_KEY_PREFIX,
};
pub use memory::{MemoryObjectStore, StoredObject};

/// Bucket holding project images (default).
pub const DEFAULT_IMAGE_BUCKET: &str = "project-images";

/// Bucket holding CV files (default).
pub const DEFAULT_CV_BUCKET: &str = "cv-files";

/// Errors raised by object store backends.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The backend could not be constructed from its configuration.
    #[error("Storage misconfigured: {0}")]
    Config(String),

    /// A filesystem operation failed.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The remote service could not be reached.
    #[error("Storage request failed: {0}")]
    Request(String),

    /// The remote service answered with a non-success status.
    #[error("Storage rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The object key is empty or escapes its bucket.
    #[error("Invalid object key: {0}")]
    InvalidKey(String),
}

/// A bucketed object store with publicly addressable objects.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Write `bytes` under `key`. Existing objects are not overwritten.
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError>;

    /// Delete the given keys. Keys that do not exist are ignored.
    async fn remove(&self, bucket: &str, keys: &[String]) -> Result<(), StorageError>;

    /// Public URL under which `key` is served.
    fn public_url(&self, bucket: &str, key: &str) -> String;

    /// Map a public URL produced by [`ObjectStore::public_url`] back to its key.
    ///
    /// Returns `None` for URLs that point outside `bucket` (for example
    /// static assets or images hosted elsewhere).
    fn key_from_public_url(&self, bucket: &str, url: &str) -> Option<String> {
        let prefix = self.public_url(bucket, "");
        let rest = url.strip_prefix(prefix.as_str())?;
        let key = rest.split(['?', '#']).next().unwrap_or_default();
        validate_key(key).ok()?;
        Some(key.to_string())
    }
}
