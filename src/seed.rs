//! One-shot database seeding with baseline site content.
//!
//! Each collection is only touched when it is empty, so re-running the seed
//! against a live database is safe.

use anyhow::Result;
use chrono::NaiveDate;

use crate::models::event::EventDraft;
use crate::models::gallery::{GalleryCategory, GalleryDraft};
use crate::models::sermon::{SermonCategory, SermonDraft};
use crate::services::content_service::ContentService;

const MEDIA_BASE: &str = "https://r2.example.com/kcf-media";

pub async fn seed_database(content: &ContentService) -> Result<()> {
    if content.list_events().await?.is_empty() {
        for draft in baseline_events() {
            content.create_event(draft).await?;
        }
        tracing::info!("Seeded events collection");
    } else {
        tracing::info!("Events collection already has data");
    }

    if content.list_sermons().await?.is_empty() {
        for draft in baseline_sermons() {
            content.create_sermon(draft).await?;
        }
        tracing::info!("Seeded sermons collection");
    } else {
        tracing::info!("Sermons collection already has data");
    }

    if content.list_gallery().await?.is_empty() {
        for draft in baseline_gallery() {
            content.create_gallery_items(draft).await?;
        }
        tracing::info!("Seeded gallery collection");
    } else {
        tracing::info!("Gallery collection already has data");
    }

    Ok(())
}

fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

fn baseline_events() -> Vec<EventDraft> {
    vec![
        EventDraft {
            title: Some("Open Heaven Conference".into()),
            date: date(2025, 9, 12),
            location: Some("Main Auditorium".into()),
            description: Some(
                "Three nights of worship, teaching, and prayer with guest ministers from across the region.".into(),
            ),
            category: Some("Conference".into()),
            image: Some(format!("{MEDIA_BASE}/events/open-heaven.jpg")),
            ..Default::default()
        },
        EventDraft {
            title: Some("Campus Prayer Walk".into()),
            date: date(2025, 10, 4),
            location: Some("University Grounds".into()),
            description: Some(
                "Interceding for every faculty, hall, and student as the semester begins.".into(),
            ),
            category: Some("Outreach".into()),
            image: Some(format!("{MEDIA_BASE}/events/prayer-walk.jpg")),
            ..Default::default()
        },
        EventDraft {
            title: Some("End of Year Worship Night".into()),
            date: date(2025, 12, 19),
            location: Some("Chapel Hall".into()),
            description: Some("An evening of thanksgiving and carols to close the year.".into()),
            category: Some("Worship".into()),
            image: Some(format!("{MEDIA_BASE}/events/worship-night.jpg")),
            ..Default::default()
        },
    ]
}

fn baseline_sermons() -> Vec<SermonDraft> {
    vec![
        SermonDraft {
            title: Some("To Us a Child is Born".into()),
            date: date(2025, 12, 25),
            description: Some("A Christmas reflection on the promise of Isaiah 9.".into()),
            category: Some(SermonCategory::ChristmasService2025),
            speaker: Some("Br. Keith".into()),
            video_url: Some(format!("{MEDIA_BASE}/sermons/child-is-born.mp4")),
            audio_url: Some(format!("{MEDIA_BASE}/audio/child-is-born.mp3")),
            thumbnail: Some(format!("{MEDIA_BASE}/kcf-images/brother-keith-teaching.jpg")),
            ..Default::default()
        },
        SermonDraft {
            title: Some("The World against Me".into()),
            date: date(2025, 12, 21),
            description: Some("Standing firm when everything around you pushes back.".into()),
            category: Some(SermonCategory::SundayService),
            speaker: Some("Sir Lyton".into()),
            video_url: Some(format!("{MEDIA_BASE}/sermons/world-against-me.mp4")),
            audio_url: Some(format!("{MEDIA_BASE}/audio/world-against-me.mp3")),
            thumbnail: Some(format!("{MEDIA_BASE}/kcf-images/media-team.jpg")),
            ..Default::default()
        },
        SermonDraft {
            title: Some("Set Your Heart On Things Above".into()),
            date: date(2025, 12, 14),
            description: Some("Colossians 3 and the discipline of heavenly focus.".into()),
            category: Some(SermonCategory::SundayService),
            speaker: Some("Admin Collete".into()),
            video_url: Some(format!("{MEDIA_BASE}/sermons/things-above.mp4")),
            audio_url: Some(format!("{MEDIA_BASE}/audio/things-above.mp3")),
            thumbnail: Some(format!("{MEDIA_BASE}/kcf-images/collete-teaching.jpg")),
            ..Default::default()
        },
    ]
}

fn baseline_gallery() -> Vec<GalleryDraft> {
    vec![
        GalleryDraft {
            title: Some("Open Heaven".into()),
            category: Some(GalleryCategory::Events),
            image_urls: vec![format!("{MEDIA_BASE}/kcf-images/open-heaven.jpg")],
            ..Default::default()
        },
        GalleryDraft {
            title: Some("Leaders Circle".into()),
            category: Some(GalleryCategory::Leaders),
            image_urls: vec![format!("{MEDIA_BASE}/kcf-images/leaders-circle.jpg")],
            ..Default::default()
        },
        GalleryDraft {
            title: Some("Youth Fire".into()),
            category: Some(GalleryCategory::Fellowship),
            image_urls: vec![format!("{MEDIA_BASE}/kcf-images/youth-fire.jpg")],
            ..Default::default()
        },
        GalleryDraft {
            title: Some("Commissioned".into()),
            category: Some(GalleryCategory::Conferences),
            image_urls: vec![format!("{MEDIA_BASE}/kcf-images/commissioned.jpg")],
            ..Default::default()
        },
        GalleryDraft {
            title: Some("Prayer Walk".into()),
            category: Some(GalleryCategory::Events),
            image_urls: vec![format!("{MEDIA_BASE}/kcf-images/prayer-walk.jpg")],
            ..Default::default()
        },
    ]
}
