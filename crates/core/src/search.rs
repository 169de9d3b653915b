//! Tag and free-text filter helpers for listing queries.
//!
//! Tags are stored lowercase and trimmed, so both the write path and the
//! filter path run through [`normalize_tags`].

/// Maximum number of results per entity type in global search.
pub const SEARCH_PROJECT_LIMIT: i64 = 10;
pub const SEARCH_POST_LIMIT: i64 = 10;
pub const SEARCH_SERVICE_LIMIT: i64 = 5;

/// Normalize a tag list: trim, lowercase, drop empties, dedupe, keep first-seen order.
pub fn normalize_tags<S: AsRef<str>>(tags: &[S]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let t = tag.as_ref().trim().to_lowercase();
        if !t.is_empty() && !out.contains(&t) {
            out.push(t);
        }
    }
    out
}

/// Parse a comma-separated `?tag=a,b` query value into normalized tags.
pub fn parse_tag_param(param: Option<&str>) -> Vec<String> {
    match param {
        Some(raw) => normalize_tags(&raw.split(',').collect::<Vec<_>>()),
        None => Vec::new(),
    }
}

/// Trim a free-text query, returning `None` when nothing is left.
pub fn normalize_query(q: Option<&str>) -> Option<String> {
    q.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}

/// Build an `ILIKE` substring pattern with `%`, `_`, and `\` escaped.
///
/// ```
/// use folio_core::search::like_pattern;
/// assert_eq!(like_pattern("rust"), "%rust%");
/// assert_eq!(like_pattern("100%_done"), "%100\\%\\_done%");
/// ```
pub fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_tags_lowercases_and_dedupes() {
        assert_eq!(
            normalize_tags(&[" Rust", "rust", "", "Axum ", "SQL"]),
            vec!["rust", "axum", "sql"]
        );
    }

    #[test]
    fn parse_tag_param_splits_on_commas() {
        assert_eq!(parse_tag_param(Some("Rust, web,,")), vec!["rust", "web"]);
        assert!(parse_tag_param(None).is_empty());
    }

    #[test]
    fn normalize_query_drops_blank() {
        assert_eq!(normalize_query(Some("  api ")), Some("api".to_string()));
        assert_eq!(normalize_query(Some("   ")), None);
        assert_eq!(normalize_query(None), None);
    }

    #[test]
    fn like_pattern_escapes_backslash() {
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }
}
