//! Repository for the `blog_posts` table.

use folio_core::content::PostStatus;
use folio_core::search::normalize_tags;
use folio_core::types::DbId;
use sqlx::PgPool;

use crate::models::blog_post::{BlogPost, CreateBlogPost, PostFilter, UpdateBlogPost, UpdatedPost};
use crate::models::tag::TagCount;
use super::listing::{bind_predicate, ContentPredicate};

const COLUMNS: &str = "\
    id, title, slug, excerpt, body, image, tags, status, published_at, \
    featured, allow_comments, view_count, likes, created_at, updated_at";

const TEXT_COLUMNS: &[&str] = &["title", "excerpt", "body"];

/// Provides CRUD, listing, and view-counting for blog posts.
pub struct BlogPostRepo;

impl BlogPostRepo {
    /// Insert a new post under an already-resolved `slug`.
    ///
    /// A post created directly as `published` without an explicit
    /// `published_at` is stamped with the current time.
    pub async fn create(
        pool: &PgPool,
        slug: &str,
        input: &CreateBlogPost,
    ) -> Result<BlogPost, sqlx::Error> {
        let query = format!(
            "INSERT INTO blog_posts
                (title, slug, excerpt, body, image, tags, status, published_at, featured,
                 allow_comments)
             VALUES ($1, $2, $3, $4, $5, $6, $7,
                     CASE WHEN $7 = 'published' THEN COALESCE($8, NOW()) ELSE $8 END,
                     $9, $10)
             RETURNING {COLUMNS}"
        );
        let tags = normalize_tags(input.tags.as_deref().unwrap_or_default());
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(&input.title)
            .bind(slug)
            .bind(input.excerpt.as_deref().unwrap_or_default())
            .bind(input.body.as_deref().unwrap_or_default())
            .bind(&input.image)
            .bind(&tags)
            .bind(input.status.unwrap_or(PostStatus::Draft).as_str())
            .bind(input.published_at)
            .bind(input.featured.unwrap_or(false))
            .bind(input.allow_comments.unwrap_or(true))
            .fetch_one(pool)
            .await
    }

    /// Find a post by ID regardless of status.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<BlogPost>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM blog_posts WHERE id = $1");
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Atomically increment the view counter of a published post.
    ///
    /// Returns `None` for an unknown slug or an unpublished post.
    pub async fn increment_views(pool: &PgPool, slug: &str) -> Result<Option<BlogPost>, sqlx::Error> {
        let query = format!(
            "UPDATE blog_posts SET view_count = view_count + 1 \
             WHERE slug = $1 AND status = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(slug)
            .bind(PostStatus::Published.as_str())
            .fetch_optional(pool)
            .await
    }

    /// A published post by slug, without counting a view.
    pub async fn find_published_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<BlogPost>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM blog_posts WHERE slug = $1 AND status = $2");
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(slug)
            .bind(PostStatus::Published.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Atomically add one like to a published post and return the new total.
    pub async fn increment_likes(pool: &PgPool, slug: &str) -> Result<Option<i64>, sqlx::Error> {
        sqlx::query_scalar(
            "UPDATE blog_posts SET likes = likes + 1 \
             WHERE slug = $1 AND status = $2 \
             RETURNING likes",
        )
        .bind(slug)
        .bind(PostStatus::Published.as_str())
        .fetch_optional(pool)
        .await
    }

    /// Up to `limit` other published posts sharing a tag with `post`, newest
    /// first. A post without tags gets the newest posts instead.
    pub async fn list_related(
        pool: &PgPool,
        post: &BlogPost,
        limit: i64,
    ) -> Result<Vec<BlogPost>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM blog_posts \
             WHERE status = $1 AND id <> $2 \
               AND (cardinality($3::text[]) = 0 OR tags && $3) \
             ORDER BY published_at DESC NULLS LAST, id DESC \
             LIMIT $4"
        );
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(PostStatus::Published.as_str())
            .bind(post.id)
            .bind(&post.tags)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// List one page of posts matching `filter` in the order it asks for.
    pub async fn list(
        pool: &PgPool,
        filter: &PostFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<BlogPost>, sqlx::Error> {
        let pred = predicate(filter);
        let (where_clause, param_idx) = pred.where_clause(1);
        let query = format!(
            "SELECT {COLUMNS} FROM blog_posts {where_clause} \
             ORDER BY {} \
             LIMIT ${param_idx} OFFSET ${}",
            filter.sort.post_order_sql(),
            param_idx + 1
        );
        bind_predicate!(sqlx::query_as::<_, BlogPost>(&query), pred)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count the posts matching `filter` (same predicate as [`Self::list`]).
    pub async fn count(pool: &PgPool, filter: &PostFilter) -> Result<i64, sqlx::Error> {
        let pred = predicate(filter);
        let (where_clause, _) = pred.where_clause(1);
        let query = format!("SELECT COUNT(*) FROM blog_posts {where_clause}");
        bind_predicate!(sqlx::query_scalar::<_, i64>(&query), pred)
            .fetch_one(pool)
            .await
    }

    /// Most recently published posts, ignoring the featured flag.
    pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<BlogPost>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM blog_posts \
             WHERE status = $1 \
             ORDER BY published_at DESC NULLS LAST, id DESC \
             LIMIT $2"
        );
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(PostStatus::Published.as_str())
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Tag usage across published posts, most used first.
    pub async fn tag_counts(pool: &PgPool) -> Result<Vec<TagCount>, sqlx::Error> {
        sqlx::query_as::<_, TagCount>(
            "SELECT tag, COUNT(*) AS count \
             FROM blog_posts, unnest(tags) AS tag \
             WHERE status = $1 \
             GROUP BY tag \
             ORDER BY count DESC, tag ASC",
        )
        .bind(PostStatus::Published.as_str())
        .fetch_all(pool)
        .await
    }

    /// Update a post. Only non-`None` fields in `input` are applied.
    ///
    /// `published_at` resolution, in priority order: `clear_published_at`
    /// nulls it, an explicit value replaces it, and a post that is (or
    /// becomes) published with no timestamp is stamped with `NOW()`.
    ///
    /// The prior status is read under `FOR UPDATE`, so of two concurrent
    /// edits publishing the same draft only one sees `was_published = false`.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateBlogPost,
    ) -> Result<Option<UpdatedPost>, sqlx::Error> {
        let query = format!(
            "UPDATE blog_posts SET
                title = COALESCE($2, title),
                slug = COALESCE($3, slug),
                excerpt = COALESCE($4, excerpt),
                body = COALESCE($5, body),
                image = COALESCE($6, image),
                tags = COALESCE($7, tags),
                status = COALESCE($8, status),
                published_at = CASE
                    WHEN $10 THEN NULL
                    WHEN $9::timestamptz IS NOT NULL THEN $9
                    WHEN COALESCE($8, status) = 'published' AND published_at IS NULL THEN NOW()
                    ELSE published_at
                END,
                featured = COALESCE($11, featured),
                allow_comments = COALESCE($12, allow_comments)
             FROM (
                 SELECT id AS prior_id, status AS prior_status
                 FROM blog_posts WHERE id = $1 FOR UPDATE
             ) prior
             WHERE blog_posts.id = prior.prior_id
             RETURNING {COLUMNS}, (prior.prior_status = 'published') AS was_published"
        );
        let tags = input.tags.as_deref().map(normalize_tags);
        sqlx::query_as::<_, UpdatedPost>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.excerpt)
            .bind(&input.body)
            .bind(&input.image)
            .bind(&tags)
            .bind(input.status.map(|s| s.as_str()))
            .bind(input.published_at)
            .bind(input.clear_published_at)
            .bind(input.featured)
            .bind(input.allow_comments)
            .fetch_optional(pool)
            .await
    }

    /// Delete a post by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM blog_posts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn predicate(filter: &PostFilter) -> ContentPredicate<'_> {
    let mut pred = ContentPredicate::new(TEXT_COLUMNS, &filter.tags, filter.q.as_deref());
    pred.status = filter.status.map(|s| s.as_str());
    pred
}
