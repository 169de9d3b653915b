//! Request handlers, one module per resource.
//!
//! Public handlers take no auth extractor. Every admin handler takes
//! [`AdminUser`](crate::middleware::auth::AdminUser) as its first parameter.

pub mod achievements;
pub mod auth;
pub mod comments;
pub mod experiences;
pub mod home;
pub mod messages;
pub mod newsletter;
pub mod posts;
pub mod projects;
pub mod services;
pub mod settings;
pub mod skills;
pub mod testimonials;

use folio_core::error::CoreError;
use folio_core::pagination::{page_offset, PAGE_SIZE};
use folio_core::slug::is_valid_slug;
use folio_core::types::DbId;

use crate::error::AppError;

/// `NotFound` for an id lookup.
pub(crate) fn not_found(entity: &'static str, id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity, id })
}

/// `NotFound` for a slug, token, or email lookup.
pub(crate) fn not_found_by(entity: &'static str, key: impl Into<String>) -> AppError {
    AppError::Core(CoreError::NotFoundBy {
        entity,
        key: key.into(),
    })
}

/// `(limit, offset)` for a clamped 1-based page.
pub(crate) fn page_window(page: i64) -> (i64, i64) {
    (PAGE_SIZE, page_offset(page))
}

/// Reject a replacement slug that is not already canonical.
pub(crate) fn check_slug_update(slug: Option<&str>) -> Result<(), CoreError> {
    match slug {
        Some(s) if !is_valid_slug(s) => Err(CoreError::Validation(format!(
            "Invalid slug '{s}'. Use lowercase letters, digits, and single hyphens"
        ))),
        _ => Ok(()),
    }
}
