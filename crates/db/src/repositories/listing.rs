//! Shared `WHERE` construction for filtered content listings.
//!
//! A listing and its `COUNT(*)` must use the identical predicate, so both
//! are built from one [`ContentPredicate`] and bound with [`bind_predicate!`]
//! in the same parameter order.

use folio_core::search::like_pattern;

/// Filter values for a table with `status`, optional `category`, `tags`, and
/// free-text columns.
pub(crate) struct ContentPredicate<'a> {
    pub status: Option<&'static str>,
    pub category: Option<&'static str>,
    pub tags: &'a [String],
    pub pattern: Option<String>,
    pub text_columns: &'static [&'static str],
}

impl<'a> ContentPredicate<'a> {
    pub fn new(text_columns: &'static [&'static str], tags: &'a [String], q: Option<&str>) -> Self {
        Self {
            status: None,
            category: None,
            tags,
            pattern: q.map(like_pattern),
            text_columns,
        }
    }

    /// Render the `WHERE` clause (empty when unfiltered) and return the next
    /// free parameter index.
    pub fn where_clause(&self, first_param: usize) -> (String, usize) {
        let mut conditions: Vec<String> = Vec::new();
        let mut param_idx = first_param;

        if self.status.is_some() {
            conditions.push(format!("status = ${param_idx}"));
            param_idx += 1;
        }
        if self.category.is_some() {
            conditions.push(format!("category = ${param_idx}"));
            param_idx += 1;
        }
        if !self.tags.is_empty() {
            conditions.push(format!("tags && ${param_idx}"));
            param_idx += 1;
        }
        if self.pattern.is_some() {
            let ors: Vec<String> = self
                .text_columns
                .iter()
                .map(|col| format!("{col} ILIKE ${param_idx}"))
                .collect();
            conditions.push(format!("({})", ors.join(" OR ")));
            param_idx += 1;
        }

        let clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };
        (clause, param_idx)
    }
}

/// Bind a [`ContentPredicate`]'s values in the order `where_clause` numbered them.
macro_rules! bind_predicate {
    ($query:expr, $pred:expr) => {{
        let mut q = $query;
        if let Some(status) = $pred.status {
            q = q.bind(status);
        }
        if let Some(category) = $pred.category {
            q = q.bind(category);
        }
        if !$pred.tags.is_empty() {
            q = q.bind($pred.tags);
        }
        if let Some(pattern) = &$pred.pattern {
            q = q.bind(pattern.clone());
        }
        q
    }};
}

pub(crate) use bind_predicate;

#[cfg(test)]
mod tests {
    use super::*;

    const COLS: &[&str] = &["title", "body"];

    #[test]
    fn unfiltered_has_no_where() {
        let pred = ContentPredicate::new(COLS, &[], None);
        assert_eq!(pred.where_clause(1), (String::new(), 1));
    }

    #[test]
    fn parameters_are_numbered_in_bind_order() {
        let tags = vec!["rust".to_string()];
        let mut pred = ContentPredicate::new(COLS, &tags, Some("api"));
        pred.status = Some("published");
        let (clause, next) = pred.where_clause(1);
        assert_eq!(
            clause,
            "WHERE status = $1 AND tags && $2 AND (title ILIKE $3 OR body ILIKE $3)"
        );
        assert_eq!(next, 4);
    }
}
