//! CRUD handlers for the three content collections.
//!
//! One triplet of endpoints per category; all payloads are JSON and every
//! mutation hands the affected record(s) back to the caller.

use crate::{
    errors::AppError,
    models::event::{Event, EventDraft},
    models::gallery::{GalleryDraft, GalleryItem},
    models::sermon::{Sermon, SermonDraft},
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

// --- Events ---

/// GET `/api/events`
pub async fn list_events(State(state): State<AppState>) -> Result<Json<Vec<Event>>, AppError> {
    Ok(Json(state.content.list_events().await?))
}

/// POST `/api/events`
pub async fn create_event(
    State(state): State<AppState>,
    Json(draft): Json<EventDraft>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.content.create_event(draft).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// PUT `/api/events/{id}`
pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(draft): Json<EventDraft>,
) -> Result<Json<Event>, AppError> {
    Ok(Json(state.content.update_event(id, draft).await?))
}

/// DELETE `/api/events/{id}`
pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Event>, AppError> {
    Ok(Json(state.content.delete_event(id).await?))
}

// --- Sermons ---

/// GET `/api/sermons`
pub async fn list_sermons(State(state): State<AppState>) -> Result<Json<Vec<Sermon>>, AppError> {
    Ok(Json(state.content.list_sermons().await?))
}

/// POST `/api/sermons`
pub async fn create_sermon(
    State(state): State<AppState>,
    Json(draft): Json<SermonDraft>,
) -> Result<impl IntoResponse, AppError> {
    let sermon = state.content.create_sermon(draft).await?;
    Ok((StatusCode::CREATED, Json(sermon)))
}

/// PUT `/api/sermons/{id}`
pub async fn update_sermon(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(draft): Json<SermonDraft>,
) -> Result<Json<Sermon>, AppError> {
    Ok(Json(state.content.update_sermon(id, draft).await?))
}

/// DELETE `/api/sermons/{id}`
pub async fn delete_sermon(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Sermon>, AppError> {
    Ok(Json(state.content.delete_sermon(id).await?))
}

// --- Gallery ---

/// GET `/api/gallery`
pub async fn list_gallery(
    State(state): State<AppState>,
) -> Result<Json<Vec<GalleryItem>>, AppError> {
    Ok(Json(state.content.list_gallery().await?))
}

/// POST `/api/gallery` — a single submission may create many records, one per
/// image URL.
pub async fn create_gallery_items(
    State(state): State<AppState>,
    Json(draft): Json<GalleryDraft>,
) -> Result<impl IntoResponse, AppError> {
    let items = state.content.create_gallery_items(draft).await?;
    Ok((StatusCode::CREATED, Json(items)))
}

/// PUT `/api/gallery/{id}`
pub async fn update_gallery_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(draft): Json<GalleryDraft>,
) -> Result<Json<GalleryItem>, AppError> {
    Ok(Json(state.content.update_gallery_item(id, draft).await?))
}

/// DELETE `/api/gallery/{id}`
pub async fn delete_gallery_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<GalleryItem>, AppError> {
    Ok(Json(state.content.delete_gallery_item(id).await?))
}
