//! Content records for the three publishing categories.
//!
//! Each module defines a persisted record (mapped to a database row via
//! `sqlx::FromRow`, serialized as JSON via `serde`) together with the draft
//! payload an admin submits. Drafts resolve into full records: uploaded media
//! takes precedence over typed URLs, and missing metadata falls back to
//! sensible defaults.

pub mod event;
pub mod gallery;
pub mod sermon;

/// Apply a default when a submitted field is absent or blank.
pub(crate) fn non_empty_or(value: Option<String>, default: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => default.to_string(),
    }
}

/// First-upload-wins precedence for a single media slot.
pub(crate) fn resolve_slot(uploaded: Option<String>, typed: Option<String>) -> Option<String> {
    uploaded
        .filter(|u| !u.trim().is_empty())
        .or(typed.filter(|u| !u.trim().is_empty()))
}
