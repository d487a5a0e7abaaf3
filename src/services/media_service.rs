//! MediaService — validates admin uploads against per-category policies and
//! transfers them to the media bucket, handing back one public URL per file.
//!
//! A batch is all-or-nothing from the caller's point of view: every file is
//! validated before any transfer starts, and a single failed transfer fails
//! the whole batch. Files that landed before the failure stay in the bucket
//! as orphans; nothing references them and nothing cleans them up.

use bytes::Bytes;
use chrono::Utc;
use futures::future;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::config::ObjectStoreConfig;
use crate::services::storage::{ObjectStorage, R2Storage, StorageError};

/// Upload category — selects the destination key prefix, the validation
/// policy, and (for content records) the target collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Gallery,
    Sermons,
    Events,
}

/// Per-category constraints applied before any transfer.
#[derive(Debug)]
pub struct UploadPolicy {
    /// Destination folder inside the bucket, including the trailing slash.
    pub key_prefix: &'static str,
    /// MIME-type prefixes accepted for this category.
    pub allowed_types: &'static [&'static str],
    pub max_bytes: usize,
}

const MB: usize = 1024 * 1024;

const GALLERY_POLICY: UploadPolicy = UploadPolicy {
    key_prefix: "kcf-images/",
    allowed_types: &["image/"],
    max_bytes: 10 * MB,
};

const SERMONS_POLICY: UploadPolicy = UploadPolicy {
    key_prefix: "sermons/",
    allowed_types: &["image/", "video/", "audio/", "application/pdf"],
    max_bytes: 100 * MB,
};

const EVENTS_POLICY: UploadPolicy = UploadPolicy {
    key_prefix: "events/",
    allowed_types: &["image/", "video/", "audio/", "application/pdf"],
    max_bytes: 50 * MB,
};

impl Category {
    pub const ALL: [Category; 3] = [Category::Gallery, Category::Sermons, Category::Events];

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "gallery" => Some(Self::Gallery),
            "sermons" => Some(Self::Sermons),
            "events" => Some(Self::Events),
            _ => None,
        }
    }

    pub fn policy(self) -> &'static UploadPolicy {
        match self {
            Self::Gallery => &GALLERY_POLICY,
            Self::Sermons => &SERMONS_POLICY,
            Self::Events => &EVENTS_POLICY,
        }
    }
}

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("file `{name}` is too large (max {max_mb}MB)")]
    FileTooLarge { name: String, max_mb: usize },
    #[error("file `{name}` has unsupported type `{content_type}`. Allowed: {allowed}")]
    UnsupportedType {
        name: String,
        content_type: String,
        allowed: String,
    },
    #[error("invalid upload type `{0}`")]
    UnknownCategory(String),
    #[error("no files provided")]
    NoFiles,
    #[error("object storage is not configured. Set {0}")]
    NotConfigured(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// One file received from the admin form.
#[derive(Debug)]
pub struct RawUpload {
    pub name: String,
    pub content_type: String,
    pub data: Bytes,
}

/// One bucket object surfaced by the media browser.
#[derive(Debug, Serialize)]
pub struct MediaEntry {
    pub id: String,
    pub src: String,
    pub folder: String,
    pub title: String,
}

const IMAGE_EXTENSIONS: [&str; 6] = [".jpg", ".jpeg", ".png", ".webp", ".gif", ".avif"];

/// Validator + Uploader over a pluggable bucket backend.
#[derive(Clone)]
pub struct MediaService {
    backend: BackendState,
}

#[derive(Clone)]
enum BackendState {
    Ready(Arc<ReadyBackend>),
    /// Names of the environment variables that were missing at startup.
    Unconfigured(Vec<&'static str>),
}

struct ReadyBackend {
    storage: Arc<dyn ObjectStorage>,
    bucket: String,
    account_id: String,
    public_base_url: Option<String>,
}

impl ReadyBackend {
    /// Public URL for a key: custom domain when configured, otherwise the
    /// provider's account-scoped URL.
    fn url_for(&self, key: &str) -> String {
        match &self.public_base_url {
            Some(base) => format!("{}/{}", base.trim_end_matches('/'), key),
            None => format!(
                "https://{}.r2.cloudflarestorage.com/{}/{}",
                self.account_id, self.bucket, key
            ),
        }
    }
}

impl MediaService {
    /// Build the service from the parsed object-store configuration.
    ///
    /// When required variables are missing the service still constructs, but
    /// every bucket operation fails with a message naming them — the rest of
    /// the API keeps working.
    pub fn from_config(cfg: Result<ObjectStoreConfig, Vec<&'static str>>) -> Self {
        match cfg {
            Ok(cfg) => {
                let backend = ReadyBackend {
                    bucket: cfg.bucket.clone(),
                    account_id: cfg.account_id.clone(),
                    public_base_url: cfg.public_base_url.clone(),
                    storage: Arc::new(R2Storage::new(cfg)),
                };
                Self {
                    backend: BackendState::Ready(Arc::new(backend)),
                }
            }
            Err(missing) => {
                tracing::warn!(
                    missing = ?missing,
                    "object storage not configured; upload endpoints will fail"
                );
                Self {
                    backend: BackendState::Unconfigured(missing),
                }
            }
        }
    }

    #[cfg(test)]
    fn with_storage(
        storage: Arc<dyn ObjectStorage>,
        account_id: &str,
        bucket: &str,
        public_base_url: Option<&str>,
    ) -> Self {
        Self {
            backend: BackendState::Ready(Arc::new(ReadyBackend {
                storage,
                bucket: bucket.to_string(),
                account_id: account_id.to_string(),
                public_base_url: public_base_url.map(str::to_string),
            })),
        }
    }

    /// Human-readable reason the bucket is unusable, if any. Used by the
    /// readiness probe.
    pub fn configuration_error(&self) -> Option<String> {
        match &self.backend {
            BackendState::Ready(_) => None,
            BackendState::Unconfigured(missing) => Some(format!("missing {}", missing.join(", "))),
        }
    }

    fn ready(&self) -> Result<&ReadyBackend, MediaError> {
        match &self.backend {
            BackendState::Ready(backend) => Ok(backend),
            BackendState::Unconfigured(missing) => {
                Err(MediaError::NotConfigured(missing.join(", ")))
            }
        }
    }

    /// Validate and transfer a batch of files, returning one public URL per
    /// file, index-aligned with the input.
    ///
    /// Validation runs for the whole batch before the first byte is sent.
    /// Transfers run concurrently; the first failure fails the batch.
    pub async fn upload_batch(
        &self,
        category: Category,
        files: Vec<RawUpload>,
    ) -> Result<Vec<String>, MediaError> {
        let policy = category.policy();
        for file in &files {
            validate_file(&file.name, &file.content_type, file.data.len(), policy)?;
        }

        let backend = self.ready()?;
        let transfers = files.into_iter().map(|file| {
            let key = storage_key(policy.key_prefix, &file.name);
            let url = backend.url_for(&key);
            let storage = Arc::clone(&backend.storage);
            async move {
                storage.put(&key, &file.content_type, file.data).await?;
                Ok::<_, MediaError>(url)
            }
        });

        let urls = future::try_join_all(transfers).await?;
        tracing::info!(count = urls.len(), category = ?category, "upload batch complete");
        Ok(urls)
    }

    /// List the images stored under every category prefix.
    ///
    /// Non-image keys (audio, video, notes) are skipped; titles are derived
    /// from the object key.
    pub async fn browse(&self) -> Result<Vec<MediaEntry>, MediaError> {
        let backend = self.ready()?;

        let listings = future::try_join_all(Category::ALL.into_iter().map(|category| {
            let prefix = category.policy().key_prefix;
            let storage = Arc::clone(&backend.storage);
            async move { Ok::<_, MediaError>((prefix, storage.list(prefix).await?)) }
        }))
        .await?;

        let mut items = Vec::new();
        for (prefix, objects) in listings {
            for object in objects {
                if !is_image_key(&object.key) {
                    continue;
                }
                items.push(MediaEntry {
                    src: backend.url_for(&object.key),
                    folder: prefix.trim_end_matches('/').to_string(),
                    title: title_from_key(&object.key),
                    id: object.key,
                });
            }
        }
        Ok(items)
    }
}

/// Check one file against the category policy. No side effects.
fn validate_file(
    name: &str,
    content_type: &str,
    size: usize,
    policy: &UploadPolicy,
) -> Result<(), MediaError> {
    if size > policy.max_bytes {
        return Err(MediaError::FileTooLarge {
            name: name.to_string(),
            max_mb: policy.max_bytes / MB,
        });
    }

    let allowed = policy
        .allowed_types
        .iter()
        .any(|prefix| content_type.starts_with(prefix));
    if !allowed {
        return Err(MediaError::UnsupportedType {
            name: name.to_string(),
            content_type: content_type.to_string(),
            allowed: policy.allowed_types.join(", "),
        });
    }

    Ok(())
}

/// Synthesize a unique storage key: `{prefix}{unix-millis}-{token}.{ext}`.
///
/// The timestamp plus random token makes collisions improbable enough that
/// existing keys are never consulted.
fn storage_key(prefix: &str, file_name: &str) -> String {
    let extension = file_name.rsplit('.').next().unwrap_or("bin");
    format!(
        "{}{}-{}.{}",
        prefix,
        Utc::now().timestamp_millis(),
        Uuid::new_v4().simple(),
        extension
    )
}

fn is_image_key(key: &str) -> bool {
    let lowered = key.to_ascii_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lowered.ends_with(ext))
}

/// Derive a display title from an object key: final path segment, extension
/// stripped, separator runs collapsed into spaces.
fn title_from_key(key: &str) -> String {
    let name = key.rsplit('/').next().unwrap_or(key);
    let stem = name.rsplit_once('.').map(|(s, _)| s).unwrap_or(name);

    let mut title = String::with_capacity(stem.len());
    let mut pending_space = false;
    for c in stem.chars() {
        if c == '-' || c == '_' {
            pending_space = !title.is_empty();
        } else {
            if pending_space {
                title.push(' ');
                pending_space = false;
            }
            title.push(c);
        }
    }
    title
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::storage::ObjectSummary;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// In-memory backend that records puts and serves canned listings.
    #[derive(Default)]
    struct FakeStorage {
        puts: Mutex<Vec<(String, String)>>,
        listing: Vec<ObjectSummary>,
        fail_puts: bool,
    }

    impl FakeStorage {
        fn put_count(&self) -> usize {
            self.puts.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ObjectStorage for FakeStorage {
        async fn put(
            &self,
            key: &str,
            content_type: &str,
            _data: Bytes,
        ) -> Result<(), StorageError> {
            if self.fail_puts {
                return Err(StorageError::UploadFailed {
                    key: key.to_string(),
                    message: "boom".into(),
                });
            }
            self.puts
                .lock()
                .unwrap()
                .push((key.to_string(), content_type.to_string()));
            Ok(())
        }

        async fn list(&self, prefix: &str) -> Result<Vec<ObjectSummary>, StorageError> {
            Ok(self
                .listing
                .iter()
                .filter(|o| o.key.starts_with(prefix))
                .cloned()
                .collect())
        }
    }

    fn service_with(fake: Arc<FakeStorage>, public_base: Option<&str>) -> MediaService {
        MediaService::with_storage(fake, "acct123", "kcf-media", public_base)
    }

    fn upload(name: &str, content_type: &str, bytes: &[u8]) -> RawUpload {
        RawUpload {
            name: name.to_string(),
            content_type: content_type.to_string(),
            data: Bytes::copy_from_slice(bytes),
        }
    }

    #[test]
    fn oversize_sermon_video_is_rejected() {
        let err = validate_file(
            "service.mp4",
            "video/mp4",
            120 * MB,
            Category::Sermons.policy(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            MediaError::FileTooLarge { max_mb: 100, .. }
        ));
    }

    #[test]
    fn gallery_accepts_images_only() {
        let policy = Category::Gallery.policy();
        assert!(validate_file("a.png", "image/png", 1024, policy).is_ok());
        assert!(matches!(
            validate_file("clip.mp4", "video/mp4", 1024, policy).unwrap_err(),
            MediaError::UnsupportedType { .. }
        ));
    }

    #[test]
    fn sermons_accept_pdf_notes() {
        assert!(validate_file("notes.pdf", "application/pdf", 1024, Category::Sermons.policy()).is_ok());
    }

    #[test]
    fn storage_key_keeps_prefix_and_extension() {
        let key = storage_key("events/", "Sunday Picnic.JPG");
        assert!(key.starts_with("events/"));
        assert!(key.ends_with(".JPG"));
        // two keys for the same name never collide
        assert_ne!(key, storage_key("events/", "Sunday Picnic.JPG"));
    }

    #[test]
    fn storage_key_without_extension_uses_whole_name() {
        let key = storage_key("kcf-images/", "snapshot");
        assert!(key.ends_with(".snapshot"));
    }

    #[tokio::test]
    async fn batch_returns_index_aligned_urls() {
        let fake = Arc::new(FakeStorage::default());
        let service = service_with(Arc::clone(&fake), Some("https://cdn.example.com/"));

        let urls = service
            .upload_batch(
                Category::Gallery,
                vec![
                    upload("a.png", "image/png", b"a"),
                    upload("b.jpg", "image/jpeg", b"b"),
                    upload("c.gif", "image/gif", b"c"),
                ],
            )
            .await
            .unwrap();

        assert_eq!(urls.len(), 3);
        assert!(urls[0].starts_with("https://cdn.example.com/kcf-images/"));
        assert!(urls[0].ends_with(".png"));
        assert!(urls[1].ends_with(".jpg"));
        assert!(urls[2].ends_with(".gif"));
        assert_eq!(fake.put_count(), 3);
    }

    #[tokio::test]
    async fn invalid_file_fails_batch_before_any_transfer() {
        let fake = Arc::new(FakeStorage::default());
        let service = service_with(Arc::clone(&fake), None);

        let err = service
            .upload_batch(
                Category::Gallery,
                vec![
                    upload("ok.png", "image/png", b"fine"),
                    upload("notes.txt", "text/plain", b"nope"),
                ],
            )
            .await
            .unwrap_err();

        assert!(matches!(err, MediaError::UnsupportedType { .. }));
        assert_eq!(fake.put_count(), 0);
    }

    #[tokio::test]
    async fn transfer_failure_fails_whole_batch() {
        let fake = Arc::new(FakeStorage {
            fail_puts: true,
            ..Default::default()
        });
        let service = service_with(Arc::clone(&fake), None);

        let err = service
            .upload_batch(Category::Events, vec![upload("a.png", "image/png", b"a")])
            .await
            .unwrap_err();
        assert!(matches!(err, MediaError::Storage(_)));
    }

    #[tokio::test]
    async fn unconfigured_service_fails_fast_with_missing_vars() {
        let service = MediaService::from_config(Err(vec!["R2_BUCKET_NAME", "R2_ENDPOINT"]));
        let err = service
            .upload_batch(Category::Gallery, vec![upload("a.png", "image/png", b"a")])
            .await
            .unwrap_err();
        match err {
            MediaError::NotConfigured(vars) => {
                assert_eq!(vars, "R2_BUCKET_NAME, R2_ENDPOINT")
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(service.configuration_error().is_some());
    }

    #[tokio::test]
    async fn fallback_url_uses_account_and_bucket() {
        let fake = Arc::new(FakeStorage::default());
        let service = service_with(Arc::clone(&fake), None);

        let urls = service
            .upload_batch(Category::Sermons, vec![upload("talk.mp3", "audio/mpeg", b"x")])
            .await
            .unwrap();
        assert!(
            urls[0].starts_with("https://acct123.r2.cloudflarestorage.com/kcf-media/sermons/")
        );
    }

    #[tokio::test]
    async fn browse_keeps_images_and_derives_titles() {
        let fake = Arc::new(FakeStorage {
            listing: vec![
                ObjectSummary {
                    key: "kcf-images/praise-night_2025.jpg".into(),
                },
                ObjectSummary {
                    key: "sermons/anchored.mp3".into(),
                },
                ObjectSummary {
                    key: "events/open-heaven.png".into(),
                },
            ],
            ..Default::default()
        });
        let service = service_with(fake, Some("https://cdn.example.com"));

        let items = service.browse().await.unwrap();
        assert_eq!(items.len(), 2);

        let gallery = &items[0];
        assert_eq!(gallery.id, "kcf-images/praise-night_2025.jpg");
        assert_eq!(gallery.folder, "kcf-images");
        assert_eq!(gallery.title, "praise night 2025");
        assert_eq!(
            gallery.src,
            "https://cdn.example.com/kcf-images/praise-night_2025.jpg"
        );
        assert_eq!(items[1].folder, "events");
    }

    #[test]
    fn title_from_key_trims_separators() {
        assert_eq!(title_from_key("kcf-images/--youth_fire--.jpg"), "youth fire");
        assert_eq!(title_from_key("plain.png"), "plain");
    }
}
