//! Repository for the `projects` table.

use folio_core::content::{ProjectCategory, ProjectStatus};
use folio_core::ordering::FEATURED_ORDER_SQL;
use folio_core::search::normalize_tags;
use folio_core::types::DbId;
use sqlx::PgPool;

use crate::models::project::{CreateProject, Project, ProjectFilter, UpdateProject};
use crate::models::tag::TagCount;
use super::listing::{bind_predicate, ContentPredicate};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "\
    id, title, slug, category, summary, description, tags, status, \
    repo_url, demo_url, image, featured, sort_order, view_count, likes, created_at, updated_at";

const TEXT_COLUMNS: &[&str] = &["title", "summary", "description"];

/// Provides CRUD, listing, and view-counting for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project under an already-resolved `slug`.
    ///
    /// Tags are normalized before storage.
    pub async fn create(
        pool: &PgPool,
        slug: &str,
        input: &CreateProject,
    ) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects
                (title, slug, category, summary, description, tags, status,
                 repo_url, demo_url, image, featured, sort_order)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING {COLUMNS}"
        );
        let tags = normalize_tags(input.tags.as_deref().unwrap_or_default());
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.title)
            .bind(slug)
            .bind(input.category.unwrap_or(ProjectCategory::WebApp).as_str())
            .bind(input.summary.as_deref().unwrap_or_default())
            .bind(input.description.as_deref().unwrap_or_default())
            .bind(&tags)
            .bind(input.status.unwrap_or(ProjectStatus::Completed).as_str())
            .bind(input.repo_url.as_deref().unwrap_or_default())
            .bind(input.demo_url.as_deref().unwrap_or_default())
            .bind(&input.image)
            .bind(input.featured.unwrap_or(false))
            .bind(input.sort_order.unwrap_or(0))
            .fetch_one(pool)
            .await
    }

    /// Find a project by ID regardless of status.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Atomically increment the view counter of a publicly visible project
    /// and return the row with its new count.
    ///
    /// Returns `None` for an unknown slug or a project that is not completed.
    pub async fn increment_views(pool: &PgPool, slug: &str) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET view_count = view_count + 1 \
             WHERE slug = $1 AND status = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(slug)
            .bind(ProjectStatus::Completed.as_str())
            .fetch_optional(pool)
            .await
    }

    /// A completed project by slug, without counting a view.
    pub async fn find_public_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE slug = $1 AND status = $2");
        sqlx::query_as::<_, Project>(&query)
            .bind(slug)
            .bind(ProjectStatus::Completed.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Atomically add one like to a completed project and return the new total.
    pub async fn increment_likes(pool: &PgPool, slug: &str) -> Result<Option<i64>, sqlx::Error> {
        sqlx::query_scalar(
            "UPDATE projects SET likes = likes + 1 \
             WHERE slug = $1 AND status = $2 \
             RETURNING likes",
        )
        .bind(slug)
        .bind(ProjectStatus::Completed.as_str())
        .fetch_optional(pool)
        .await
    }

    /// Up to `limit` other completed projects related to `project`.
    ///
    /// Projects sharing a tag come first, then projects in the same category,
    /// each group in featured listing order.
    pub async fn list_related(
        pool: &PgPool,
        project: &Project,
        limit: i64,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects \
             WHERE status = $1 AND id <> $2 AND (tags && $3 OR category = $4) \
             ORDER BY (tags && $3) DESC, {FEATURED_ORDER_SQL} \
             LIMIT $5"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(ProjectStatus::Completed.as_str())
            .bind(project.id)
            .bind(&project.tags)
            .bind(&project.category)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// List one page of projects matching `filter` in the order it asks for.
    pub async fn list(
        pool: &PgPool,
        filter: &ProjectFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let pred = predicate(filter);
        let (where_clause, param_idx) = pred.where_clause(1);
        let query = format!(
            "SELECT {COLUMNS} FROM projects {where_clause} \
             ORDER BY {} \
             LIMIT ${param_idx} OFFSET ${}",
            filter.sort.project_order_sql(),
            param_idx + 1
        );
        bind_predicate!(sqlx::query_as::<_, Project>(&query), pred)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count the projects matching `filter` (same predicate as [`Self::list`]).
    pub async fn count(pool: &PgPool, filter: &ProjectFilter) -> Result<i64, sqlx::Error> {
        let pred = predicate(filter);
        let (where_clause, _) = pred.where_clause(1);
        let query = format!("SELECT COUNT(*) FROM projects {where_clause}");
        bind_predicate!(sqlx::query_scalar::<_, i64>(&query), pred)
            .fetch_one(pool)
            .await
    }

    /// Featured, publicly visible projects for the home page.
    pub async fn list_featured(pool: &PgPool, limit: i64) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects \
             WHERE status = $1 AND featured \
             ORDER BY {FEATURED_ORDER_SQL} \
             LIMIT $2"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(ProjectStatus::Completed.as_str())
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Tag usage across publicly visible projects, most used first.
    pub async fn tag_counts(pool: &PgPool) -> Result<Vec<TagCount>, sqlx::Error> {
        sqlx::query_as::<_, TagCount>(
            "SELECT tag, COUNT(*) AS count \
             FROM projects, unnest(tags) AS tag \
             WHERE status = $1 \
             GROUP BY tag \
             ORDER BY count DESC, tag ASC",
        )
        .bind(ProjectStatus::Completed.as_str())
        .fetch_all(pool)
        .await
    }

    /// Update a project. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                title = COALESCE($2, title),
                slug = COALESCE($3, slug),
                category = COALESCE($4, category),
                summary = COALESCE($5, summary),
                description = COALESCE($6, description),
                tags = COALESCE($7, tags),
                status = COALESCE($8, status),
                repo_url = COALESCE($9, repo_url),
                demo_url = COALESCE($10, demo_url),
                image = COALESCE($11, image),
                featured = COALESCE($12, featured),
                sort_order = COALESCE($13, sort_order)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let tags = input.tags.as_deref().map(normalize_tags);
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(input.category.map(|c| c.as_str()))
            .bind(&input.summary)
            .bind(&input.description)
            .bind(&tags)
            .bind(input.status.map(|s| s.as_str()))
            .bind(&input.repo_url)
            .bind(&input.demo_url)
            .bind(&input.image)
            .bind(input.featured)
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await
    }

    /// Delete a project by ID. Returns `true` if a row was removed.
    ///
    /// Testimonials referencing it keep their row with `project_id` nulled.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn predicate(filter: &ProjectFilter) -> ContentPredicate<'_> {
    let mut pred = ContentPredicate::new(TEXT_COLUMNS, &filter.tags, filter.q.as_deref());
    pred.status = filter.status.map(|s| s.as_str());
    pred.category = filter.category.map(|c| c.as_str());
    pred
}
