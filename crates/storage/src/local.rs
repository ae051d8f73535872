//! Filesystem-backed object store.
//!
//! Objects live at `{root}/{bucket}/{key}` and are served by the API at
//! `{public_base_url}{LOCAL_ROUTE_PREFIX}/{bucket}/{key}`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use folio_core::storage::{validate_key, ObjectStore, StorageError};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Route under which the API serves the local storage root.
pub const LOCAL_ROUTE_PREFIX: &str = "/storage";

pub struct LocalObjectStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalObjectStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: &str) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    fn object_path(&self, bucket: &str, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(bucket)?;
        validate_key(key)?;
        Ok(self.root.join(bucket).join(key))
    }
}

/// Write `bytes` to `temp_path`, then move it to `path`.
///
/// On any failure the temp file is removed before the error is returned.
async fn write_then_rename(temp_path: &Path, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let result = async {
        let mut file = fs::File::create(temp_path).await?;
        file.write_all(bytes).await?;
        file.sync_all().await?;
        drop(file);
        fs::rename(temp_path, path).await
    }
    .await;

    if result.is_err() {
        if let Err(e) = fs::remove_file(temp_path).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(
                    path = %temp_path.display(),
                    error = %e,
                    "local_storage: failed to remove temp file"
                );
            }
        }
    }
    result
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        _content_type: &str,
    ) -> Result<(), StorageError> {
        let path = self.object_path(bucket, key)?;
        if fs::try_exists(&path).await? {
            return Err(StorageError::Rejected {
                status: 409,
                message: format!("object '{key}' already exists in bucket '{bucket}'"),
            });
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        // Write to a temp file and rename so readers never see partial objects.
        let mut temp_path = path.clone().into_os_string();
        temp_path.push(".part");
        write_then_rename(Path::new(&temp_path), &path, &bytes).await?;

        tracing::debug!(bucket, key, size = bytes.len(), "local_storage: wrote object");
        Ok(())
    }

    async fn remove(&self, bucket: &str, keys: &[String]) -> Result<(), StorageError> {
        for key in keys {
            let path = self.object_path(bucket, key)?;
            match fs::remove_file(&path).await {
                Ok(()) => tracing::debug!(bucket, key = %key, "local_storage: removed object"),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    fn public_url(&self, bucket: &str, key: &str) -> String {
        format!(
            "{}{LOCAL_ROUTE_PREFIX}/{bucket}/{key}",
            self.public_base_url
        )
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn store(dir: &tempfile::TempDir) -> LocalObjectStore {
        LocalObjectStore::new(dir.path(), "http://localhost:3000/")
    }

    #[tokio::test]
    async fn upload_writes_under_bucket_and_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);

        store
            .upload("project-images", "projects/a.png", b"png".to_vec(), "image/png")
            .await
            .unwrap();

        let written = std::fs::read(dir.path().join("project-images/projects/a.png")).unwrap();
        assert_eq!(written, b"png");
        assert!(!dir.path().join("project-images/projects/a.png.part").exists());
    }

    #[tokio::test]
    async fn upload_does_not_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);
        store.upload("b", "k.pdf", b"one".to_vec(), "x").await.unwrap();

        let result = store.upload("b", "k.pdf", b"two".to_vec(), "x").await;
        assert_matches!(result, Err(StorageError::Rejected { status: 409, .. }));
        assert_eq!(std::fs::read(dir.path().join("b/k.pdf")).unwrap(), b"one");
    }

    #[tokio::test]
    async fn failed_rename_removes_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        // A non-empty directory at the destination makes the rename fail.
        let target = dir.path().join("occupied");
        std::fs::create_dir_all(target.join("inner")).unwrap();
        let temp = dir.path().join("occupied.part");

        let result = write_then_rename(&temp, &target, b"data").await;

        assert!(result.is_err());
        assert!(!temp.exists());
        assert!(target.join("inner").is_dir());
    }

    #[tokio::test]
    async fn failed_create_leaves_nothing_behind() {
        let dir = tempfile::tempdir().unwrap();
        let temp = dir.path().join("missing-dir/a.pdf.part");

        let result = write_then_rename(&temp, &dir.path().join("missing-dir/a.pdf"), b"x").await;

        assert!(result.is_err());
        assert!(!temp.exists());
    }

    #[tokio::test]
    async fn remove_ignores_missing_objects() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);
        store.upload("b", "k.pdf", b"one".to_vec(), "x").await.unwrap();

        store
            .remove("b", &["k.pdf".to_string(), "never-existed.pdf".to_string()])
            .await
            .unwrap();
        assert!(!dir.path().join("b/k.pdf").exists());
    }

    #[tokio::test]
    async fn keys_escaping_the_root_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);
        let result = store.upload("b", "../escape.txt", Vec::new(), "x").await;
        assert_matches!(result, Err(StorageError::InvalidKey(_)));
    }

    #[test]
    fn public_url_round_trips_to_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);
        let url = store.public_url("project-images", "projects/a.png");
        assert_eq!(url, "http://localhost:3000/storage/project-images/projects/a.png");
        assert_eq!(
            store.key_from_public_url("project-images", &url).as_deref(),
            Some("projects/a.png")
        );
    }
}
