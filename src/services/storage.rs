//! Object-storage backend abstraction and the R2 implementation.
//!
//! The media service only needs two operations from the bucket — write an
//! object and list a prefix — so the trait stays that small. Tests substitute
//! an in-memory fake; production talks to Cloudflare R2 through the S3 API.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::Client;
use aws_sdk_s3::config::Credentials;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use std::time::Instant;
use thiserror::Error;
use tokio::sync::OnceCell;

use crate::config::ObjectStoreConfig;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("upload of `{key}` failed: {message}")]
    UploadFailed { key: String, message: String },
    #[error("listing objects under `{prefix}` failed: {message}")]
    ListFailed { prefix: String, message: String },
}

/// Summary of one stored object, as returned by a prefix listing.
#[derive(Debug, Clone)]
pub struct ObjectSummary {
    pub key: String,
}

/// Write/list operations the media service needs from an object store.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Write `data` at `key` with the declared content type attached.
    ///
    /// The bucket is expected to serve objects publicly once written; R2 has
    /// no per-object ACLs.
    async fn put(&self, key: &str, content_type: &str, data: Bytes) -> Result<(), StorageError>;

    /// List every object whose key starts with `prefix`.
    async fn list(&self, prefix: &str) -> Result<Vec<ObjectSummary>, StorageError>;
}

/// S3-compatible backend targeting Cloudflare R2.
///
/// The SDK client is constructed lazily on first use and reused for the
/// lifetime of the process.
pub struct R2Storage {
    cfg: ObjectStoreConfig,
    client: OnceCell<Client>,
}

impl R2Storage {
    pub fn new(cfg: ObjectStoreConfig) -> Self {
        Self {
            cfg,
            client: OnceCell::new(),
        }
    }

    async fn client(&self) -> &Client {
        self.client
            .get_or_init(|| async {
                let credentials = Credentials::new(
                    self.cfg.access_key_id.clone(),
                    self.cfg.secret_access_key.clone(),
                    None,
                    None,
                    "env",
                );
                let sdk_config = aws_config::defaults(BehaviorVersion::latest())
                    .region(Region::new(self.cfg.region.clone()))
                    .credentials_provider(credentials)
                    .endpoint_url(self.cfg.endpoint.clone())
                    .load()
                    .await;
                // R2 and other S3-compatible providers require path-style addressing.
                let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
                    .force_path_style(true)
                    .build();
                Client::from_conf(s3_config)
            })
            .await
    }
}

#[async_trait]
impl ObjectStorage for R2Storage {
    async fn put(&self, key: &str, content_type: &str, data: Bytes) -> Result<(), StorageError> {
        let size = data.len();
        let start = Instant::now();

        self.client()
            .await
            .put_object()
            .bucket(&self.cfg.bucket)
            .key(key)
            .body(ByteStream::from(data))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %self.cfg.bucket,
                    key = %key,
                    size_bytes = size,
                    "object upload failed"
                );
                StorageError::UploadFailed {
                    key: key.to_string(),
                    message: e.to_string(),
                }
            })?;

        tracing::info!(
            bucket = %self.cfg.bucket,
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "object stored"
        );

        Ok(())
    }

    async fn list(&self, prefix: &str) -> Result<Vec<ObjectSummary>, StorageError> {
        let client = self.client().await;
        let mut summaries = Vec::new();
        let mut continuation: Option<String> = None;

        loop {
            let mut request = client
                .list_objects_v2()
                .bucket(&self.cfg.bucket)
                .prefix(prefix);
            if let Some(token) = &continuation {
                request = request.continuation_token(token);
            }

            let page = request.send().await.map_err(|e| {
                tracing::error!(error = %e, bucket = %self.cfg.bucket, prefix = %prefix, "listing failed");
                StorageError::ListFailed {
                    prefix: prefix.to_string(),
                    message: e.to_string(),
                }
            })?;

            for object in page.contents() {
                if let Some(key) = object.key() {
                    summaries.push(ObjectSummary {
                        key: key.to_string(),
                    });
                }
            }

            continuation = if page.is_truncated() == Some(true) {
                page.next_continuation_token().map(str::to_string)
            } else {
                None
            };
            if continuation.is_none() {
                break;
            }
        }

        Ok(summaries)
    }
}
