//! Shared application state handed to every handler.

use crate::services::content_service::ContentService;
use crate::services::media_service::MediaService;

#[derive(Clone)]
pub struct AppState {
    pub content: ContentService,
    pub media: MediaService,
}
