//! Domain error taxonomy shared by every Folio crate.

use crate::types::DbId;

/// A failure in a domain rule.
///
/// Validation failures never have side effects: callers check before they
/// write. Missing rows are their own variants so that "nothing found" is
/// never confused with an empty success.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Lookup by primary key found nothing.
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// Lookup by a natural key (slug, token, email) found nothing.
    #[error("Entity not found: {entity} '{key}'")]
    NotFoundBy { entity: &'static str, key: String },

    /// A single rule was broken (bad slug, out-of-range rating, date order).
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Field-level validation failures, keyed by input field name.
    #[error("Validation failed: {0}")]
    InvalidFields(#[from] validator::ValidationErrors),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The caller is known but the action is not allowed, or the feature is
    /// switched off in site settings.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Too many submissions from one source within the rate window.
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// A broken invariant, e.g. the settings singleton holding two rows.
    #[error("Internal error: {0}")]
    Internal(String),
}
