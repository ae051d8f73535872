//! Upload orchestration for project images.
//!
//! Every flow here is a plain sequence of awaited calls against an
//! [`ObjectStore`] plus a caller-supplied `persist` step that writes the
//! database row. Ordering rules:
//!
//! - Creation uploads first and only persists when *every* file made it.
//!   Anything already uploaded is removed again if a later step fails.
//! - Updates persist the new image list first and only then delete the
//!   images that were marked for removal, so a failure in between leaves
//!   orphaned objects rather than a row pointing at deleted images.
//!
//! Cleanup is attempted once; its failures are logged and never surfaced.

use std::future::Future;

use crate::storage::{image_object_key, ObjectStore};

/// A file received from a client, ready to be stored.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// An object successfully written to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedObject {
    pub file_name: String,
    pub key: String,
    pub url: String,
}

/// Result of uploading a batch of files one after another.
#[derive(Debug, Clone, Default)]
pub struct UploadBatch {
    pub uploaded: Vec<UploadedObject>,
    /// Original names of the files that could not be stored.
    pub failed: Vec<String>,
}

impl UploadBatch {
    pub fn urls(&self) -> Vec<String> {
        self.uploaded.iter().map(|o| o.url.clone()).collect()
    }

    pub fn keys(&self) -> Vec<String> {
        self.uploaded.iter().map(|o| o.key.clone()).collect()
    }
}

/// Errors from the image flows, generic over the persistence error.
#[derive(Debug, thiserror::Error)]
pub enum UploadError<E> {
    #[error("At least one image is required")]
    NoImages,

    #[error("Failed to upload {} of {total} image(s): {}", .failed.len(), .failed.join(", "))]
    PartialUpload { failed: Vec<String>, total: usize },

    #[error(transparent)]
    Persist(E),
}

/// How a project's image list changes on edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpdatePlan {
    /// `(previous - removed) ∪ uploaded`, previous order first.
    pub final_urls: Vec<String>,
    /// Removed URLs that were actually part of the previous list.
    pub to_delete: Vec<String>,
}

/// Outcome of [`update_with_images`].
#[derive(Debug)]
pub struct ImageUpdate<T> {
    pub value: T,
    pub plan: ImageUpdatePlan,
    /// Names of new files that failed to upload and were skipped.
    pub skipped: Vec<String>,
}

/// Upload `files` sequentially under freshly generated keys.
///
/// A failing file is logged and skipped; it is not retried.
pub async fn upload_images<S>(store: &S, bucket: &str, files: Vec<UploadFile>) -> UploadBatch
where
    S: ObjectStore + ?Sized,
{
    let mut batch = UploadBatch::default();
    for file in files {
        let key = image_object_key(&file.file_name);
        match store
            .upload(bucket, &key, file.bytes, &file.content_type)
            .await
        {
            Ok(()) => {
                let url = store.public_url(bucket, &key);
                tracing::debug!(bucket, key = %key, file_name = %file.file_name, "Image uploaded");
                batch.uploaded.push(UploadedObject {
                    file_name: file.file_name,
                    key,
                    url,
                });
            }
            Err(e) => {
                tracing::warn!(
                    bucket,
                    file_name = %file.file_name,
                    error = %e,
                    "Image upload failed, skipping file"
                );
                batch.failed.push(file.file_name);
            }
        }
    }
    batch
}

/// Best-effort removal of `keys`. Failures are logged only.
pub async fn cleanup_objects<S>(store: &S, bucket: &str, keys: &[String])
where
    S: ObjectStore + ?Sized,
{
    if keys.is_empty() {
        return;
    }
    match store.remove(bucket, keys).await {
        Ok(()) => tracing::info!(bucket, count = keys.len(), "Removed stored objects"),
        Err(e) => tracing::error!(
            bucket,
            keys = ?keys,
            error = %e,
            "Failed to remove stored objects, leaving them orphaned"
        ),
    }
}

/// Best-effort removal of objects by public URL.
///
/// URLs that do not belong to `bucket` are skipped.
pub async fn cleanup_urls<S>(store: &S, bucket: &str, urls: &[String])
where
    S: ObjectStore + ?Sized,
{
    let keys: Vec<String> = urls
        .iter()
        .filter_map(|url| {
            let key = store.key_from_public_url(bucket, url);
            if key.is_none() {
                tracing::debug!(bucket, url = %url, "URL is not a stored object, skipping removal");
            }
            key
        })
        .collect();
    cleanup_objects(store, bucket, &keys).await;
}

/// Compute the image list after an edit.
pub fn plan_image_update(
    previous: &[String],
    removed: &[String],
    uploaded: &[String],
) -> ImageUpdatePlan {
    let mut final_urls: Vec<String> = Vec::with_capacity(previous.len() + uploaded.len());
    for url in previous.iter().filter(|url| !removed.contains(url)) {
        if !final_urls.contains(url) {
            final_urls.push(url.clone());
        }
    }
    for url in uploaded {
        if !final_urls.contains(url) {
            final_urls.push(url.clone());
        }
    }

    let mut to_delete: Vec<String> = Vec::new();
    for url in removed.iter().filter(|url| previous.contains(url)) {
        if !to_delete.contains(url) {
            to_delete.push(url.clone());
        }
    }

    ImageUpdatePlan {
        final_urls,
        to_delete,
    }
}

/// Upload every file, then persist the resulting URL list.
///
/// Fails without calling `persist` when no file was given or when any file
/// could not be uploaded; in the latter case the files that did upload are
/// removed again. A failing `persist` also triggers that cleanup.
pub async fn create_with_images<S, F, Fut, T, E>(
    store: &S,
    bucket: &str,
    files: Vec<UploadFile>,
    persist: F,
) -> Result<T, UploadError<E>>
where
    S: ObjectStore + ?Sized,
    F: FnOnce(Vec<String>) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    if files.is_empty() {
        return Err(UploadError::NoImages);
    }

    let total = files.len();
    let batch = upload_images(store, bucket, files).await;
    if !batch.failed.is_empty() {
        tracing::warn!(
            bucket,
            failed = batch.failed.len(),
            total,
            "Aborting creation after failed image upload"
        );
        cleanup_objects(store, bucket, &batch.keys()).await;
        return Err(UploadError::PartialUpload {
            failed: batch.failed,
            total,
        });
    }

    match persist(batch.urls()).await {
        Ok(value) => Ok(value),
        Err(e) => {
            tracing::warn!(bucket, error = %e, "Persisting failed, removing uploaded images");
            cleanup_objects(store, bucket, &batch.keys()).await;
            Err(UploadError::Persist(e))
        }
    }
}

/// Upload new files, persist the merged list, then delete removed images.
///
/// New files that fail to upload are skipped. An edit that would leave the
/// project without images is rejected before anything is persisted.
pub async fn update_with_images<S, F, Fut, T, E>(
    store: &S,
    bucket: &str,
    previous: &[String],
    removed: &[String],
    files: Vec<UploadFile>,
    persist: F,
) -> Result<ImageUpdate<T>, UploadError<E>>
where
    S: ObjectStore + ?Sized,
    F: FnOnce(Vec<String>) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let batch = upload_images(store, bucket, files).await;
    let plan = plan_image_update(previous, removed, &batch.urls());

    if plan.final_urls.is_empty() {
        cleanup_objects(store, bucket, &batch.keys()).await;
        return Err(UploadError::NoImages);
    }

    let value = match persist(plan.final_urls.clone()).await {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(bucket, error = %e, "Persisting failed, removing newly uploaded images");
            cleanup_objects(store, bucket, &batch.keys()).await;
            return Err(UploadError::Persist(e));
        }
    };

    cleanup_urls(store, bucket, &plan.to_delete).await;

    Ok(ImageUpdate {
        value,
        plan,
        skipped: batch.failed,
    })
}
