//! Client for a hosted storage REST API.
//!
//! Endpoints used:
//!
//! ```text
//! POST   {url}/storage/v1/object/{bucket}/{key}     upload (no upsert)
//! DELETE {url}/storage/v1/object/{bucket}           remove, body {"prefixes": [...]}
//!        {url}/storage/v1/object/public/{bucket}/{key}  public URL
//! ```
//!
//! Every request carries the public key both as `apikey` and as a bearer token.

use std::fmt;

use async_trait::async_trait;
use folio_core::storage::{validate_key, ObjectStore, StorageError};
use reqwest::header::{AUTHORIZATION, CACHE_CONTROL, CONTENT_TYPE};
use reqwest::{Client, Response};

pub struct RemoteObjectStore {
    client: Client,
    base_url: String,
    public_key: String,
}

impl RemoteObjectStore {
    pub fn new(url: &str, public_key: &str) -> Result<Self, StorageError> {
        let base_url = url.trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(StorageError::Config(format!(
                "STORAGE_URL must be an http(s) URL, got '{url}'"
            )));
        }
        let client = Client::builder()
            .build()
            .map_err(|e| StorageError::Config(e.to_string()))?;
        Ok(Self {
            client,
            base_url,
            public_key: public_key.to_string(),
        })
    }

    fn object_endpoint(&self, bucket: &str) -> String {
        format!("{}/storage/v1/object/{bucket}", self.base_url)
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.public_key)
            .header(AUTHORIZATION, format!("Bearer {}", self.public_key))
    }
}

impl fmt::Debug for RemoteObjectStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteObjectStore")
            .field("base_url", &self.base_url)
            .field("public_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

/// Turn a non-success response into [`StorageError::Rejected`].
async fn check(response: Response) -> Result<(), StorageError> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    let message = response
        .text()
        .await
        .unwrap_or_else(|_| status.canonical_reason().unwrap_or("unknown").to_string());
    Err(StorageError::Rejected {
        status: status.as_u16(),
        message,
    })
}

fn request_error(err: reqwest::Error) -> StorageError {
    StorageError::Request(err.to_string())
}

#[async_trait]
impl ObjectStore for RemoteObjectStore {
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError> {
        validate_key(key)?;
        let url = format!("{}/{key}", self.object_endpoint(bucket));
        let response = self
            .authorized(self.client.post(&url))
            .header(CONTENT_TYPE, content_type)
            .header(CACHE_CONTROL, "max-age=3600")
            .header("x-upsert", "false")
            .body(bytes)
            .send()
            .await
            .map_err(request_error)?;
        check(response).await?;
        tracing::debug!(bucket, key, "remote_storage: uploaded object");
        Ok(())
    }

    async fn remove(&self, bucket: &str, keys: &[String]) -> Result<(), StorageError> {
        if keys.is_empty() {
            return Ok(());
        }
        let response = self
            .authorized(self.client.delete(self.object_endpoint(bucket)))
            .json(&serde_json::json!({ "prefixes": keys }))
            .send()
            .await
            .map_err(request_error)?;
        check(response).await
    }

    fn public_url(&self, bucket: &str, key: &str) -> String {
        format!("{}/storage/v1/object/public/{bucket}/{key}", self.base_url)
    }
}
