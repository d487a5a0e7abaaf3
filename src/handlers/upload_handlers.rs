//! Multipart upload endpoint.
//!
//! Accepts a `type` field selecting the category plus any number of `files`
//! parts, and responds with the public URL of every stored file.

use crate::{
    errors::AppError,
    services::media_service::{Category, MediaError, RawUpload},
    state::AppState,
};
use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
};
use serde::Serialize;

#[derive(Serialize)]
pub struct UploadResponse {
    pub success: bool,
    /// One URL per file, index-aligned with the submitted order.
    pub urls: Vec<String>,
    pub count: usize,
}

/// POST `/api/upload` — validate and store a batch of files.
pub async fn upload_files(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut category = Category::Gallery;
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| AppError::new(StatusCode::BAD_REQUEST, err.to_string()))?
    {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "type" => {
                let value = field
                    .text()
                    .await
                    .map_err(|err| AppError::new(StatusCode::BAD_REQUEST, err.to_string()))?;
                category =
                    Category::parse(&value).ok_or(MediaError::UnknownCategory(value))?;
            }
            "files" => {
                let name = field.file_name().unwrap_or("upload").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|err| AppError::new(StatusCode::BAD_REQUEST, err.to_string()))?;
                // Browsers submit an empty part for untouched file inputs.
                if data.is_empty() {
                    continue;
                }
                files.push(RawUpload {
                    name,
                    content_type,
                    data,
                });
            }
            _ => {}
        }
    }

    if files.is_empty() {
        return Err(MediaError::NoFiles.into());
    }

    tracing::info!(count = files.len(), category = ?category, "processing upload request");
    let urls = state.media.upload_batch(category, files).await?;

    Ok(Json(UploadResponse {
        success: true,
        count: urls.len(),
        urls,
    }))
}
