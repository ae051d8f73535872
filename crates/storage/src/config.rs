use std::path::PathBuf;

use folio_core::storage::{StorageError, DEFAULT_CV_BUCKET, DEFAULT_IMAGE_BUCKET};

/// Which backend stores the objects, and how to reach it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendConfig {
    Local {
        root: PathBuf,
        public_base_url: String,
    },
    Remote {
        url: String,
        public_key: String,
    },
}

/// Object storage configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub backend: BackendConfig,
    /// Bucket for project images.
    pub image_bucket: String,
    /// Bucket for CV files.
    pub cv_bucket: String,
}

impl StorageConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var              | Default                  |
    /// |----------------------|--------------------------|
    /// | `STORAGE_BACKEND`    | `local`                  |
    /// | `STORAGE_LOCAL_DIR`  | `storage`                |
    /// | `PUBLIC_BASE_URL`    | `http://localhost:3000`  |
    /// | `STORAGE_URL`        | required for `remote`    |
    /// | `STORAGE_PUBLIC_KEY` | required for `remote`    |
    /// | `IMAGE_BUCKET`       | `project-images`         |
    /// | `CV_BUCKET`          | `cv-files`               |
    pub fn from_env() -> Result<Self, StorageError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`StorageConfig::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, StorageError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let backend = match var("STORAGE_BACKEND").as_deref().unwrap_or("local") {
            "local" => BackendConfig::Local {
                root: PathBuf::from(var("STORAGE_LOCAL_DIR").unwrap_or_else(|| "storage".into())),
                public_base_url: var("PUBLIC_BASE_URL")
                    .unwrap_or_else(|| "http://localhost:3000".into()),
            },
            "remote" => {
                let (Some(url), Some(public_key)) = (var("STORAGE_URL"), var("STORAGE_PUBLIC_KEY"))
                else {
                    tracing::error!(
                        "STORAGE_URL or STORAGE_PUBLIC_KEY is missing from environment variables"
                    );
                    return Err(StorageError::Config(
                        "Cannot create storage client due to missing STORAGE_URL or STORAGE_PUBLIC_KEY"
                            .into(),
                    ));
                };
                BackendConfig::Remote { url, public_key }
            }
            other => {
                return Err(StorageError::Config(format!(
                    "Unknown STORAGE_BACKEND '{other}'. Must be one of: local, remote"
                )));
            }
        };

        Ok(Self {
            backend,
            image_bucket: var("IMAGE_BUCKET").unwrap_or_else(|| DEFAULT_IMAGE_BUCKET.into()),
            cv_bucket: var("CV_BUCKET").unwrap_or_else(|| DEFAULT_CV_BUCKET.into()),
        })
    }
}
