use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use super::{validate_key, ObjectStore, StorageError};

/// An object held by [`MemoryObjectStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

#[derive(Debug, Default)]
struct Inner {
    objects: BTreeMap<(String, String), StoredObject>,
    upload_calls: usize,
    failing_uploads: BTreeSet<usize>,
    fail_removals: bool,
    removal_batches: Vec<Vec<String>>,
}

/// In-process object store.
///
/// Failure injection is by call order: [`MemoryObjectStore::fail_upload_call`]
/// makes the n-th `upload` call (0-based) fail, which is how tests simulate
/// one file of a batch being rejected.
#[derive(Debug, Default)]
pub struct MemoryObjectStore {
    inner: Mutex<Inner>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Make the `n`-th upload call (0-based, counted from store creation) fail.
    pub fn fail_upload_call(&self, n: usize) {
        self.lock().failing_uploads.insert(n);
    }

    /// Make every subsequent `remove` call fail.
    pub fn fail_removals(&self) {
        self.lock().fail_removals = true;
    }

    /// Insert an object directly, bypassing failure injection.
    pub fn seed(&self, bucket: &str, key: &str, bytes: &[u8]) {
        self.lock().objects.insert(
            (bucket.to_string(), key.to_string()),
            StoredObject {
                bytes: bytes.to_vec(),
                content_type: "application/octet-stream".to_string(),
            },
        );
    }

    pub fn get(&self, bucket: &str, key: &str) -> Option<StoredObject> {
        self.lock()
            .objects
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
    }

    pub fn contains(&self, bucket: &str, key: &str) -> bool {
        self.get(bucket, key).is_some()
    }

    /// Keys currently stored in `bucket`, sorted.
    pub fn keys(&self, bucket: &str) -> Vec<String> {
        self.lock()
            .objects
            .keys()
            .filter(|(b, _)| b == bucket)
            .map(|(_, k)| k.clone())
            .collect()
    }

    /// Every batch passed to `remove`, including failed ones, in call order.
    pub fn removal_batches(&self) -> Vec<Vec<String>> {
        self.lock().removal_batches.clone()
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError> {
        validate_key(key)?;
        let mut inner = self.lock();
        let call = inner.upload_calls;
        inner.upload_calls += 1;
        if inner.failing_uploads.contains(&call) {
            return Err(StorageError::Rejected {
                status: 500,
                message: format!("injected failure for upload call {call}"),
            });
        }
        let slot = (bucket.to_string(), key.to_string());
        if inner.objects.contains_key(&slot) {
            return Err(StorageError::Rejected {
                status: 409,
                message: format!("object '{key}' already exists"),
            });
        }
        inner.objects.insert(
            slot,
            StoredObject {
                bytes,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    async fn remove(&self, bucket: &str, keys: &[String]) -> Result<(), StorageError> {
        let mut inner = self.lock();
        inner.removal_batches.push(keys.to_vec());
        if inner.fail_removals {
            return Err(StorageError::Request("injected removal failure".into()));
        }
        for key in keys {
            inner.objects.remove(&(bucket.to_string(), key.clone()));
        }
        Ok(())
    }

    fn public_url(&self, bucket: &str, key: &str) -> String {
        format!("memory://{bucket}/{key}")
    }
}
