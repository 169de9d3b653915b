//! Fixed-size page arithmetic for public and admin listings.

use serde::Serialize;

/// Items per page on every paginated listing.
pub const PAGE_SIZE: i64 = 12;

/// Clamp a user-provided 1-based page number to at least 1.
pub fn clamp_page(page: Option<i64>) -> i64 {
    page.unwrap_or(1).max(1)
}

/// Row offset for a (clamped) 1-based page.
pub fn page_offset(page: i64) -> i64 {
    (clamp_page(Some(page)) - 1).saturating_mul(PAGE_SIZE)
}

/// Number of pages needed for `total` rows. An empty result has zero pages.
pub fn total_pages(total: i64) -> i64 {
    if total <= 0 {
        0
    } else {
        (total + PAGE_SIZE - 1) / PAGE_SIZE
    }
}

/// One page of a listing plus the exact count of the filtered predicate.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, page: i64, total: i64) -> Self {
        Self {
            items,
            page,
            page_size: PAGE_SIZE,
            total,
            total_pages: total_pages(total),
        }
    }

    /// Transform the items while keeping the page metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total: self.total,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_page_defaults_and_floors() {
        assert_eq!(clamp_page(None), 1);
        assert_eq!(clamp_page(Some(0)), 1);
        assert_eq!(clamp_page(Some(-4)), 1);
        assert_eq!(clamp_page(Some(3)), 3);
    }

    #[test]
    fn offsets_step_by_page_size() {
        assert_eq!(page_offset(1), 0);
        assert_eq!(page_offset(2), PAGE_SIZE);
        assert_eq!(page_offset(0), 0);
    }

    #[test]
    fn total_pages_has_no_off_by_one() {
        assert_eq!(total_pages(0), 0);
        assert_eq!(total_pages(1), 1);
        assert_eq!(total_pages(PAGE_SIZE), 1);
        assert_eq!(total_pages(PAGE_SIZE + 1), 2);
        assert_eq!(total_pages(PAGE_SIZE * 3), 3);
    }

    #[test]
    fn map_preserves_metadata() {
        let page = Page::new(vec![1, 2, 3], 2, 15).map(|n| n * 10);
        assert_eq!(page.items, vec![10, 20, 30]);
        assert_eq!(page.page, 2);
        assert_eq!(page.total, 15);
        assert_eq!(page.total_pages, 2);
    }
}
