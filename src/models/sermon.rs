//! Represents a published sermon with its four media slots.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const DEFAULT_VIDEO_URL: &str =
    "https://storage.googleapis.com/coverr-main/mp4%2FMovement.mp4";
pub const DEFAULT_AUDIO_URL: &str = "https://r2.example.com/kcf-media/audio/sample.mp3";
pub const DEFAULT_THUMBNAIL_URL: &str =
    "https://images.unsplash.com/photo-1500530855697-b586d89ba3ee?auto=format&fit=crop&w=800&q=80";

/// The fixed set of sermon series labels.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug, sqlx::Type)]
pub enum SermonCategory {
    #[serde(rename = "Sunday Service")]
    #[sqlx(rename = "Sunday Service")]
    SundayService,
    #[serde(rename = "Youth Service")]
    #[sqlx(rename = "Youth Service")]
    YouthService,
    Conferences,
    #[serde(rename = "Special Sermons")]
    #[sqlx(rename = "Special Sermons")]
    SpecialSermons,
    #[serde(rename = "2025 Christmas Service")]
    #[sqlx(rename = "2025 Christmas Service")]
    ChristmasService2025,
}

/// A sermon as stored in the `sermons` collection.
///
/// Video and audio are always present (defaults guarantee it); notes are the
/// one optional slot.
#[derive(Serialize, Deserialize, Clone, FromRow, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Sermon {
    /// Stable identifier, generated at creation and never reused.
    pub id: Uuid,

    pub title: String,

    pub date: NaiveDate,

    pub description: String,

    pub category: SermonCategory,

    pub speaker: String,

    pub video_url: String,

    pub audio_url: String,

    pub notes_url: Option<String>,

    pub thumbnail: String,
}

/// URLs returned by the upload endpoint for each sermon media slot.
///
/// The four uploads are independent; any subset may be present.
#[derive(Debug, Default, Deserialize)]
pub struct SermonUploads {
    pub thumbnail: Option<String>,
    pub video: Option<String>,
    pub audio: Option<String>,
    pub notes: Option<String>,
}

/// Submission payload for creating or replacing a sermon.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SermonDraft {
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
    pub category: Option<SermonCategory>,
    pub speaker: Option<String>,
    pub video_url: Option<String>,
    pub audio_url: Option<String>,
    pub notes_url: Option<String>,
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub uploaded: SermonUploads,
}

impl SermonDraft {
    /// Assemble a full record with a fresh identifier.
    ///
    /// Each media slot resolves uploaded URL first, then the typed URL, then
    /// the slot's default. Notes have no default and stay empty.
    pub fn resolve(self) -> Sermon {
        let video_url = super::resolve_slot(self.uploaded.video, self.video_url)
            .unwrap_or_else(|| DEFAULT_VIDEO_URL.to_string());
        let audio_url = super::resolve_slot(self.uploaded.audio, self.audio_url)
            .unwrap_or_else(|| DEFAULT_AUDIO_URL.to_string());
        let thumbnail = super::resolve_slot(self.uploaded.thumbnail, self.thumbnail)
            .unwrap_or_else(|| DEFAULT_THUMBNAIL_URL.to_string());
        let notes_url = super::resolve_slot(self.uploaded.notes, self.notes_url);

        Sermon {
            id: Uuid::new_v4(),
            title: super::non_empty_or(self.title, "Untitled Sermon"),
            date: self.date.unwrap_or_else(|| Utc::now().date_naive()),
            description: self.description.unwrap_or_default(),
            category: self.category.unwrap_or(SermonCategory::SundayService),
            speaker: super::non_empty_or(self.speaker, "Team"),
            video_url,
            audio_url,
            notes_url,
            thumbnail,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uploaded_slot_wins_over_typed_url() {
        let sermon = SermonDraft {
            video_url: Some("https://example.com/typed.mp4".into()),
            uploaded: SermonUploads {
                video: Some("https://cdn.example.com/sermons/talk.mp4".into()),
                ..Default::default()
            },
            ..Default::default()
        }
        .resolve();
        assert_eq!(sermon.video_url, "https://cdn.example.com/sermons/talk.mp4");
    }

    #[test]
    fn typed_url_used_as_fallback() {
        let sermon = SermonDraft {
            audio_url: Some("https://example.com/typed.mp3".into()),
            ..Default::default()
        }
        .resolve();
        assert_eq!(sermon.audio_url, "https://example.com/typed.mp3");
    }

    #[test]
    fn empty_slots_resolve_to_defaults() {
        let sermon = SermonDraft::default().resolve();
        assert_eq!(sermon.title, "Untitled Sermon");
        assert_eq!(sermon.speaker, "Team");
        assert_eq!(sermon.category, SermonCategory::SundayService);
        assert_eq!(sermon.video_url, DEFAULT_VIDEO_URL);
        assert_eq!(sermon.audio_url, DEFAULT_AUDIO_URL);
        assert_eq!(sermon.thumbnail, DEFAULT_THUMBNAIL_URL);
        assert_eq!(sermon.notes_url, None);
    }

    #[test]
    fn notes_stay_optional() {
        let sermon = SermonDraft {
            uploaded: SermonUploads {
                notes: Some("https://cdn.example.com/sermons/outline.pdf".into()),
                ..Default::default()
            },
            ..Default::default()
        }
        .resolve();
        assert_eq!(
            sermon.notes_url.as_deref(),
            Some("https://cdn.example.com/sermons/outline.pdf")
        );
    }
}
