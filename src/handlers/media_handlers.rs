//! Bucket browsing endpoint.

use crate::{errors::AppError, services::media_service::MediaEntry, state::AppState};
use axum::{Json, extract::State};
use serde::Serialize;

#[derive(Serialize)]
pub struct MediaListing {
    pub items: Vec<MediaEntry>,
}

/// GET `/api/media` — list the images stored under every category folder,
/// with public URLs and titles derived from the object keys.
pub async fn browse_media(State(state): State<AppState>) -> Result<Json<MediaListing>, AppError> {
    let items = state.media.browse().await?;
    Ok(Json(MediaListing { items }))
}
