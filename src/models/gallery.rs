//! Represents photo gallery entries.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// The fixed set of gallery groupings.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug, sqlx::Type)]
pub enum GalleryCategory {
    Events,
    Fellowship,
    Leaders,
    Conferences,
}

/// A gallery entry as stored in the `gallery_items` collection.
#[derive(Serialize, Deserialize, Clone, FromRow, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GalleryItem {
    /// Stable identifier, generated at creation and never reused.
    pub id: Uuid,

    pub title: String,

    pub category: GalleryCategory,

    pub image: String,

    pub description: Option<String>,
}

/// Submission payload for gallery entries.
///
/// A single submission may carry many image URLs — uploaded and/or pasted —
/// and fans out into one record per URL, all sharing the same metadata.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryDraft {
    pub title: Option<String>,
    pub category: Option<GalleryCategory>,
    pub description: Option<String>,
    /// URLs returned by the upload endpoint, in upload order.
    #[serde(default)]
    pub uploaded_urls: Vec<String>,
    /// Externally supplied URLs pasted into the form.
    #[serde(default)]
    pub image_urls: Vec<String>,
}

impl GalleryDraft {
    /// Fan the draft out into one record per URL, uploaded URLs first.
    ///
    /// Blank entries (empty lines from the paste box) are dropped; an empty
    /// result means the submission carried no usable media.
    pub fn resolve(self) -> Vec<GalleryItem> {
        let title = match self.title {
            Some(t) if !t.trim().is_empty() => t,
            _ => format!("Gallery Item {}", Utc::now().date_naive()),
        };
        let category = self.category.unwrap_or(GalleryCategory::Events);
        let description = self.description.filter(|d| !d.trim().is_empty());

        self.uploaded_urls
            .into_iter()
            .chain(self.image_urls)
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .map(|image| GalleryItem {
                id: Uuid::new_v4(),
                title: title.clone(),
                category,
                image,
                description: description.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_record_per_url_with_shared_metadata() {
        let items = GalleryDraft {
            title: Some("Retreat 2025".into()),
            category: Some(GalleryCategory::Fellowship),
            uploaded_urls: vec!["https://cdn.example.com/kcf-images/a.jpg".into()],
            image_urls: vec![
                "https://example.com/b.jpg".into(),
                "https://example.com/c.jpg".into(),
            ],
            ..Default::default()
        }
        .resolve();

        assert_eq!(items.len(), 3);
        assert!(items.iter().all(|i| i.title == "Retreat 2025"));
        assert!(items.iter().all(|i| i.category == GalleryCategory::Fellowship));
        // uploaded first, then pasted, in order
        assert_eq!(items[0].image, "https://cdn.example.com/kcf-images/a.jpg");
        assert_eq!(items[1].image, "https://example.com/b.jpg");
        assert_eq!(items[2].image, "https://example.com/c.jpg");
        assert_ne!(items[0].id, items[1].id);
        assert_ne!(items[1].id, items[2].id);
    }

    #[test]
    fn blank_lines_are_dropped() {
        let items = GalleryDraft {
            image_urls: vec!["  ".into(), "".into(), "https://example.com/x.jpg".into()],
            ..Default::default()
        }
        .resolve();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].image, "https://example.com/x.jpg");
    }

    #[test]
    fn empty_submission_resolves_to_nothing() {
        assert!(GalleryDraft::default().resolve().is_empty());
    }
}
