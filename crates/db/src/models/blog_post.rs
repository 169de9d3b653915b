//! Blog post entity model, DTOs, and the public view with reading time.

use folio_core::content::PostStatus;
use folio_core::ordering::ListSort;
use folio_core::reading_time::reading_time_minutes;
use folio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `blog_posts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BlogPost {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub body: String,
    pub image: Option<String>,
    pub tags: Vec<String>,
    pub status: String,
    pub published_at: Option<Timestamp>,
    pub featured: bool,
    pub allow_comments: bool,
    pub view_count: i64,
    pub likes: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl BlogPost {
    pub fn is_published(&self) -> bool {
        self.status == PostStatus::Published.as_str()
    }
}

/// Result of an update: the new row plus whether it was published before.
#[derive(Debug, Clone, FromRow)]
pub struct UpdatedPost {
    #[sqlx(flatten)]
    pub post: BlogPost,
    pub was_published: bool,
}

impl UpdatedPost {
    /// This update moved the post into `published`.
    pub fn newly_published(&self) -> bool {
        !self.was_published && self.post.is_published()
    }
}

/// A post as returned by the API. Reading time is computed from `body` on
/// every read and never stored.
#[derive(Debug, Clone, Serialize)]
pub struct BlogPostView {
    #[serde(flatten)]
    pub post: BlogPost,
    pub reading_time_minutes: i32,
}

impl From<BlogPost> for BlogPostView {
    fn from(post: BlogPost) -> Self {
        let reading_time_minutes = reading_time_minutes(&post.body);
        Self {
            post,
            reading_time_minutes,
        }
    }
}

/// DTO for creating a post. `slug` is derived from `title` when absent.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBlogPost {
    pub title: String,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub body: Option<String>,
    pub image: Option<String>,
    pub tags: Option<Vec<String>>,
    pub status: Option<PostStatus>,
    pub published_at: Option<Timestamp>,
    pub featured: Option<bool>,
    pub allow_comments: Option<bool>,
}

/// DTO for updating a post. Only non-`None` fields are applied.
///
/// Moving into `published` stamps `published_at` if it is still empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBlogPost {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub body: Option<String>,
    pub image: Option<String>,
    pub tags: Option<Vec<String>>,
    pub status: Option<PostStatus>,
    pub published_at: Option<Timestamp>,
    #[serde(default)]
    pub clear_published_at: bool,
    pub featured: Option<bool>,
    pub allow_comments: Option<bool>,
}

/// Filter for post listings.
#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    pub status: Option<PostStatus>,
    pub tags: Vec<String>,
    /// Case-insensitive substring over title, excerpt, and body.
    pub q: Option<String>,
    pub sort: ListSort,
}

impl PostFilter {
    /// A filter restricted to published posts.
    pub fn public() -> Self {
        Self {
            status: Some(PostStatus::Published),
            ..Default::default()
        }
    }
}
