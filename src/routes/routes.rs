//! Defines routes for the public content API and the upload pipeline.
//!
//! ## Structure
//! - **Upload & media**
//!   - `POST /api/upload` — multipart upload (category + files)
//!   - `GET  /api/media`  — browse the images stored in the bucket
//!
//! - **Content collections** (one triplet per category)
//!   - `GET/POST   /api/events`,  `PUT/DELETE /api/events/{id}`
//!   - `GET/POST   /api/sermons`, `PUT/DELETE /api/sermons/{id}`
//!   - `GET/POST   /api/gallery`, `PUT/DELETE /api/gallery/{id}`
//!
//! Health endpoints (`/healthz`, `/readyz`) are mounted at the root.

use crate::{
    handlers::{
        content_handlers::{
            create_event, create_gallery_items, create_sermon, delete_event, delete_gallery_item,
            delete_sermon, list_events, list_gallery, list_sermons, update_event,
            update_gallery_item, update_sermon,
        },
        health_handlers::{healthz, readyz},
        media_handlers::browse_media,
        upload_handlers::upload_files,
    },
    state::AppState,
};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post, put},
};

/// Largest accepted request body. Sermon uploads may carry a 100MB video plus
/// companion files in the same multipart submission.
const MAX_BODY_BYTES: usize = 256 * 1024 * 1024;

/// Build and return the router for the whole API.
///
/// The router carries shared state (`AppState`) to all handlers.
pub fn routes() -> Router<AppState> {
    Router::new()
        // health endpoints (mounted at root)
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // upload pipeline
        .route("/api/upload", post(upload_files))
        .route("/api/media", get(browse_media))
        // content collections
        .route("/api/events", get(list_events).post(create_event))
        .route(
            "/api/events/{id}",
            put(update_event).delete(delete_event),
        )
        .route("/api/sermons", get(list_sermons).post(create_sermon))
        .route(
            "/api/sermons/{id}",
            put(update_sermon).delete(delete_sermon),
        )
        .route("/api/gallery", get(list_gallery).post(create_gallery_items))
        .route(
            "/api/gallery/{id}",
            put(update_gallery_item).delete(delete_gallery_item),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
}
