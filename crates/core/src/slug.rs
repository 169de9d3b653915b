//! URL slugs for projects, posts, and services.

use crate::error::CoreError;

/// Maximum slug length, matching the `VARCHAR(200)` columns.
pub const MAX_SLUG_LEN: usize = 200;

/// Derive a slug from a title.
///
/// Lowercases ASCII alphanumerics and collapses every other run of characters
/// into a single `-`, with no leading or trailing hyphen.
///
/// ```
/// use folio_core::slug::slugify;
/// assert_eq!(slugify("Hello, World!"), "hello-world");
/// assert_eq!(slugify("  Rust & Axum -- 2024 "), "rust-axum-2024");
/// ```
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug.truncate(MAX_SLUG_LEN);
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Check that an explicitly supplied slug is already in canonical form.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty() && slug.len() <= MAX_SLUG_LEN && slugify(slug) == slug
}

/// Resolve the slug to store: the explicit one if given (validated), else one
/// derived from `title`.
pub fn resolve_slug(explicit: Option<&str>, title: &str) -> Result<String, CoreError> {
    match explicit {
        Some(s) if is_valid_slug(s) => Ok(s.to_string()),
        Some(s) => Err(CoreError::Validation(format!(
            "Invalid slug '{s}'. Use lowercase letters, digits, and single hyphens"
        ))),
        None => {
            let derived = slugify(title);
            if derived.is_empty() {
                Err(CoreError::Validation(
                    "Title must contain at least one letter or digit".into(),
                ))
            } else {
                Ok(derived)
            }
        }
    }
}
