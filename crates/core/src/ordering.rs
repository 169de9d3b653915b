//! Deterministic listing order for featured content.
//!
//! Projects, testimonials, and services list featured items first, then by
//! the manual `sort_order`, then newest first, with the row id as the final
//! tie-break so that two rows never compare equal. Public project and post
//! listings may pick another order with [`ListSort`].

/// `ORDER BY` for tables with `featured` and `sort_order` columns.
pub const FEATURED_ORDER_SQL: &str = "featured DESC, sort_order ASC, created_at DESC, id DESC";

/// `ORDER BY` for blog posts, which have no manual order field.
pub const POST_ORDER_SQL: &str =
    "featured DESC, published_at DESC NULLS LAST, created_at DESC, id DESC";

/// `ORDER BY` for skills: grouped by category, ordered within it.
pub const SKILL_ORDER_SQL: &str = "category ASC, sort_order ASC, name ASC, id ASC";

/// `ORDER BY` for experience: current roles first, then most recent start.
pub const EXPERIENCE_ORDER_SQL: &str =
    "(end_date IS NULL) DESC, start_date DESC, sort_order ASC, id DESC";

/// Related items returned next to a project or post detail.
pub const RELATED_LIMIT: i64 = 3;

/// Visitor-selectable order for project and post listings (`?sort=`).
///
/// Every variant ends in `id DESC` so pages never overlap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListSort {
    /// The resource's own listing order.
    #[default]
    Default,
    MostViewed,
    Newest,
    Title,
    MostLiked,
}

impl ListSort {
    /// Parse a `?sort=` value. Unknown or blank values keep the default order.
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("-views") => Self::MostViewed,
            Some("-created_at" | "-published_at") => Self::Newest,
            Some("title") => Self::Title,
            Some("-likes") => Self::MostLiked,
            _ => Self::Default,
        }
    }

    /// `ORDER BY` for the `projects` table.
    pub fn project_order_sql(self) -> &'static str {
        match self {
            Self::Default => FEATURED_ORDER_SQL,
            Self::MostViewed => "view_count DESC, id DESC",
            Self::Newest => "created_at DESC, id DESC",
            Self::Title => "lower(title) ASC, id DESC",
            Self::MostLiked => "likes DESC, id DESC",
        }
    }

    /// `ORDER BY` for the `blog_posts` table. Newest means newest published.
    pub fn post_order_sql(self) -> &'static str {
        match self {
            Self::Default => POST_ORDER_SQL,
            Self::MostViewed => "view_count DESC, id DESC",
            Self::Newest => "published_at DESC NULLS LAST, id DESC",
            Self::Title => "lower(title) ASC, id DESC",
            Self::MostLiked => "likes DESC, id DESC",
        }
    }
}
