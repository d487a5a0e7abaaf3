//! ContentService — persists events, sermons, and gallery items.
//!
//! Each operation is a single-row statement; there is no cross-record
//! transaction, so two admins publishing at once can interleave freely and
//! the database's row-level atomicity is the only consistency guarantee.
//! Create/edit/delete all hand the affected record back so clients can update
//! their state without a reload.

use sqlx::SqlitePool;
use sqlx::types::Json;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::models::event::{Event, EventDraft};
use crate::models::gallery::{GalleryDraft, GalleryItem};
use crate::models::sermon::{Sermon, SermonDraft};

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("{kind} `{id}` not found")]
    NotFound { kind: &'static str, id: Uuid },
    #[error("provide either uploaded files or image URLs")]
    MissingMedia,
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

pub type ContentResult<T> = Result<T, ContentError>;

#[derive(Clone)]
pub struct ContentService {
    /// Shared SQLite connection pool.
    pub db: Arc<SqlitePool>,
}

impl ContentService {
    pub fn new(db: Arc<SqlitePool>) -> Self {
        Self { db }
    }

    // --- Events ---

    pub async fn list_events(&self) -> ContentResult<Vec<Event>> {
        let events = sqlx::query_as::<_, Event>(
            "SELECT id, title, date, location, description, image, category, media_urls
             FROM events ORDER BY date DESC",
        )
        .fetch_all(&*self.db)
        .await?;
        Ok(events)
    }

    pub async fn create_event(&self, draft: EventDraft) -> ContentResult<Event> {
        let event = draft.resolve();
        let created = sqlx::query_as::<_, Event>(
            "INSERT INTO events (id, title, date, location, description, image, category, media_urls)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING id, title, date, location, description, image, category, media_urls",
        )
        .bind(event.id)
        .bind(&event.title)
        .bind(event.date)
        .bind(&event.location)
        .bind(&event.description)
        .bind(&event.image)
        .bind(&event.category)
        .bind(Json(&event.media_urls))
        .fetch_one(&*self.db)
        .await?;

        tracing::info!(id = %created.id, title = %created.title, "event created");
        Ok(created)
    }

    /// Full-field replace of an existing event.
    pub async fn update_event(&self, id: Uuid, draft: EventDraft) -> ContentResult<Event> {
        let fields = draft.resolve();
        sqlx::query_as::<_, Event>(
            "UPDATE events
             SET title = ?, date = ?, location = ?, description = ?, image = ?, category = ?, media_urls = ?
             WHERE id = ?
             RETURNING id, title, date, location, description, image, category, media_urls",
        )
        .bind(&fields.title)
        .bind(fields.date)
        .bind(&fields.location)
        .bind(&fields.description)
        .bind(&fields.image)
        .bind(&fields.category)
        .bind(Json(&fields.media_urls))
        .bind(id)
        .fetch_optional(&*self.db)
        .await?
        .ok_or(ContentError::NotFound { kind: "event", id })
    }

    pub async fn delete_event(&self, id: Uuid) -> ContentResult<Event> {
        sqlx::query_as::<_, Event>(
            "DELETE FROM events WHERE id = ?
             RETURNING id, title, date, location, description, image, category, media_urls",
        )
        .bind(id)
        .fetch_optional(&*self.db)
        .await?
        .ok_or(ContentError::NotFound { kind: "event", id })
    }

    // --- Sermons ---

    pub async fn list_sermons(&self) -> ContentResult<Vec<Sermon>> {
        let sermons = sqlx::query_as::<_, Sermon>(
            "SELECT id, title, date, description, category, speaker,
                    video_url, audio_url, notes_url, thumbnail
             FROM sermons ORDER BY date DESC",
        )
        .fetch_all(&*self.db)
        .await?;
        Ok(sermons)
    }

    pub async fn create_sermon(&self, draft: SermonDraft) -> ContentResult<Sermon> {
        let sermon = draft.resolve();
        let created = sqlx::query_as::<_, Sermon>(
            "INSERT INTO sermons (id, title, date, description, category, speaker,
                                  video_url, audio_url, notes_url, thumbnail)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING id, title, date, description, category, speaker,
                       video_url, audio_url, notes_url, thumbnail",
        )
        .bind(sermon.id)
        .bind(&sermon.title)
        .bind(sermon.date)
        .bind(&sermon.description)
        .bind(sermon.category)
        .bind(&sermon.speaker)
        .bind(&sermon.video_url)
        .bind(&sermon.audio_url)
        .bind(&sermon.notes_url)
        .bind(&sermon.thumbnail)
        .fetch_one(&*self.db)
        .await?;

        tracing::info!(id = %created.id, title = %created.title, "sermon created");
        Ok(created)
    }

    /// Full-field replace of an existing sermon.
    pub async fn update_sermon(&self, id: Uuid, draft: SermonDraft) -> ContentResult<Sermon> {
        let fields = draft.resolve();
        sqlx::query_as::<_, Sermon>(
            "UPDATE sermons
             SET title = ?, date = ?, description = ?, category = ?, speaker = ?,
                 video_url = ?, audio_url = ?, notes_url = ?, thumbnail = ?
             WHERE id = ?
             RETURNING id, title, date, description, category, speaker,
                       video_url, audio_url, notes_url, thumbnail",
        )
        .bind(&fields.title)
        .bind(fields.date)
        .bind(&fields.description)
        .bind(fields.category)
        .bind(&fields.speaker)
        .bind(&fields.video_url)
        .bind(&fields.audio_url)
        .bind(&fields.notes_url)
        .bind(&fields.thumbnail)
        .bind(id)
        .fetch_optional(&*self.db)
        .await?
        .ok_or(ContentError::NotFound { kind: "sermon", id })
    }

    pub async fn delete_sermon(&self, id: Uuid) -> ContentResult<Sermon> {
        sqlx::query_as::<_, Sermon>(
            "DELETE FROM sermons WHERE id = ?
             RETURNING id, title, date, description, category, speaker,
                       video_url, audio_url, notes_url, thumbnail",
        )
        .bind(id)
        .fetch_optional(&*self.db)
        .await?
        .ok_or(ContentError::NotFound { kind: "sermon", id })
    }

    // --- Gallery ---

    pub async fn list_gallery(&self) -> ContentResult<Vec<GalleryItem>> {
        let items = sqlx::query_as::<_, GalleryItem>(
            "SELECT id, title, category, image, description FROM gallery_items",
        )
        .fetch_all(&*self.db)
        .await?;
        Ok(items)
    }

    /// Fan a gallery submission out into one record per URL.
    ///
    /// Records are inserted one by one; a mid-batch failure leaves the
    /// earlier inserts in place, mirroring the per-record atomicity of the
    /// rest of the service.
    pub async fn create_gallery_items(&self, draft: GalleryDraft) -> ContentResult<Vec<GalleryItem>> {
        let items = draft.resolve();
        if items.is_empty() {
            return Err(ContentError::MissingMedia);
        }

        let mut created = Vec::with_capacity(items.len());
        for item in items {
            let row = sqlx::query_as::<_, GalleryItem>(
                "INSERT INTO gallery_items (id, title, category, image, description)
                 VALUES (?, ?, ?, ?, ?)
                 RETURNING id, title, category, image, description",
            )
            .bind(item.id)
            .bind(&item.title)
            .bind(item.category)
            .bind(&item.image)
            .bind(&item.description)
            .fetch_one(&*self.db)
            .await?;
            created.push(row);
        }

        tracing::info!(count = created.len(), "gallery items created");
        Ok(created)
    }

    /// Full-field replace of an existing gallery item.
    ///
    /// Edits address one record, so only the first resolved URL is applied.
    pub async fn update_gallery_item(
        &self,
        id: Uuid,
        draft: GalleryDraft,
    ) -> ContentResult<GalleryItem> {
        let mut items = draft.resolve();
        if items.is_empty() {
            return Err(ContentError::MissingMedia);
        }
        let fields = items.remove(0);

        sqlx::query_as::<_, GalleryItem>(
            "UPDATE gallery_items SET title = ?, category = ?, image = ?, description = ?
             WHERE id = ?
             RETURNING id, title, category, image, description",
        )
        .bind(&fields.title)
        .bind(fields.category)
        .bind(&fields.image)
        .bind(&fields.description)
        .bind(id)
        .fetch_optional(&*self.db)
        .await?
        .ok_or(ContentError::NotFound {
            kind: "gallery item",
            id,
        })
    }

    pub async fn delete_gallery_item(&self, id: Uuid) -> ContentResult<GalleryItem> {
        sqlx::query_as::<_, GalleryItem>(
            "DELETE FROM gallery_items WHERE id = ?
             RETURNING id, title, category, image, description",
        )
        .bind(id)
        .fetch_optional(&*self.db)
        .await?
        .ok_or(ContentError::NotFound {
            kind: "gallery item",
            id,
        })
    }
}
