//! Core services: media upload/browse and content persistence.

pub mod content_service;
pub mod media_service;
pub mod storage;
