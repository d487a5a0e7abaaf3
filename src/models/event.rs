//! Represents a published fellowship event.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Stock image used when an event is published without any media.
pub const DEFAULT_EVENT_IMAGE: &str =
    "https://images.unsplash.com/photo-1492724441997-5dc865305da7?auto=format&fit=crop&w=1200&q=80";

/// An event as stored in the `events` collection and returned to clients.
#[derive(Serialize, Deserialize, Clone, FromRow, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Stable identifier, generated at creation and never reused.
    pub id: Uuid,

    pub title: String,

    pub date: NaiveDate,

    pub location: String,

    pub description: String,

    /// Primary image URL (uploaded or externally supplied).
    pub image: String,

    /// Free-form grouping label shown on the events page.
    pub category: String,

    /// Uploaded media beyond the primary image.
    #[sqlx(json)]
    pub media_urls: Vec<String>,
}

/// Submission payload for creating or replacing an event.
///
/// `uploaded_urls` holds the URLs returned by the upload endpoint, in upload
/// order; `image` is the URL typed directly into the form.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub image: Option<String>,
    #[serde(default)]
    pub uploaded_urls: Vec<String>,
}

impl EventDraft {
    /// Assemble a full record with a fresh identifier.
    ///
    /// The first uploaded URL becomes the primary image, falling back to the
    /// typed URL and then the stock image; any remaining uploaded URLs are
    /// kept as extra media.
    pub fn resolve(self) -> Event {
        let mut uploaded = self.uploaded_urls.into_iter();
        let image = uploaded
            .next()
            .or(self.image.filter(|u| !u.trim().is_empty()))
            .unwrap_or_else(|| DEFAULT_EVENT_IMAGE.to_string());

        Event {
            id: Uuid::new_v4(),
            title: super::non_empty_or(self.title, "Untitled Event"),
            date: self.date.unwrap_or_else(|| Utc::now().date_naive()),
            location: super::non_empty_or(self.location, "TBD"),
            description: self.description.unwrap_or_default(),
            image,
            category: super::non_empty_or(self.category, "Conference"),
            media_urls: uploaded.collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_draft_gets_defaults() {
        let event = EventDraft::default().resolve();
        assert_eq!(event.title, "Untitled Event");
        assert_eq!(event.location, "TBD");
        assert_eq!(event.category, "Conference");
        assert_eq!(event.image, DEFAULT_EVENT_IMAGE);
        assert!(event.media_urls.is_empty());
        assert!(!event.id.is_nil());
    }

    #[test]
    fn uploaded_image_wins_over_typed_url() {
        let event = EventDraft {
            image: Some("https://example.com/typed.jpg".into()),
            uploaded_urls: vec![
                "https://cdn.example.com/events/a.jpg".into(),
                "https://cdn.example.com/events/b.jpg".into(),
            ],
            ..Default::default()
        }
        .resolve();
        assert_eq!(event.image, "https://cdn.example.com/events/a.jpg");
        assert_eq!(event.media_urls, vec!["https://cdn.example.com/events/b.jpg"]);
    }

    #[test]
    fn typed_url_used_when_nothing_uploaded() {
        let event = EventDraft {
            image: Some("https://example.com/typed.jpg".into()),
            ..Default::default()
        }
        .resolve();
        assert_eq!(event.image, "https://example.com/typed.jpg");
    }

    #[test]
    fn blank_typed_url_falls_back_to_stock_image() {
        let event = EventDraft {
            image: Some("   ".into()),
            ..Default::default()
        }
        .resolve();
        assert_eq!(event.image, DEFAULT_EVENT_IMAGE);
    }
}
