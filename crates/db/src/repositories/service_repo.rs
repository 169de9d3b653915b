//! Repository for the `services` table.

use folio_core::ordering::FEATURED_ORDER_SQL;
use folio_core::search::like_pattern;
use folio_core::types::DbId;
use sqlx::PgPool;

use crate::models::service::{CreateService, Service, UpdateService};

const COLUMNS: &str = "\
    id, title, slug, short_description, description, icon, image, starting_price_cents, \
    deliverables, sort_order, is_active, featured, created_at, updated_at";

/// Provides CRUD operations for offered services.
pub struct ServiceRepo;

impl ServiceRepo {
    /// Insert a new service under an already-resolved `slug`.
    pub async fn create(
        pool: &PgPool,
        slug: &str,
        input: &CreateService,
    ) -> Result<Service, sqlx::Error> {
        let query = format!(
            "INSERT INTO services
                (title, slug, short_description, description, icon, image,
                 starting_price_cents, deliverables, sort_order, is_active, featured)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Service>(&query)
            .bind(&input.title)
            .bind(slug)
            .bind(input.short_description.as_deref().unwrap_or_default())
            .bind(input.description.as_deref().unwrap_or_default())
            .bind(input.icon.as_deref().unwrap_or_default())
            .bind(&input.image)
            .bind(input.starting_price_cents)
            .bind(input.deliverables.as_deref().unwrap_or_default())
            .bind(input.sort_order.unwrap_or(0))
            .bind(input.is_active.unwrap_or(true))
            .bind(input.featured.unwrap_or(false))
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Service>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM services WHERE id = $1");
        sqlx::query_as::<_, Service>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_all(pool: &PgPool) -> Result<Vec<Service>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM services ORDER BY {FEATURED_ORDER_SQL}");
        sqlx::query_as::<_, Service>(&query).fetch_all(pool).await
    }

    /// Active services in listing order.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<Service>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM services WHERE is_active ORDER BY {FEATURED_ORDER_SQL}"
        );
        sqlx::query_as::<_, Service>(&query).fetch_all(pool).await
    }

    /// Active services whose title or descriptions contain `term`.
    pub async fn search(pool: &PgPool, term: &str, limit: i64) -> Result<Vec<Service>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM services \
             WHERE is_active \
               AND (title ILIKE $1 OR short_description ILIKE $1 OR description ILIKE $1) \
             ORDER BY {FEATURED_ORDER_SQL} \
             LIMIT $2"
        );
        sqlx::query_as::<_, Service>(&query)
            .bind(like_pattern(term))
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateService,
    ) -> Result<Option<Service>, sqlx::Error> {
        let query = format!(
            "UPDATE services SET
                title = COALESCE($2, title),
                slug = COALESCE($3, slug),
                short_description = COALESCE($4, short_description),
                description = COALESCE($5, description),
                icon = COALESCE($6, icon),
                image = COALESCE($7, image),
                starting_price_cents = COALESCE($8, starting_price_cents),
                deliverables = COALESCE($9, deliverables),
                sort_order = COALESCE($10, sort_order),
                is_active = COALESCE($11, is_active),
                featured = COALESCE($12, featured)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Service>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.short_description)
            .bind(&input.description)
            .bind(&input.icon)
            .bind(&input.image)
            .bind(input.starting_price_cents)
            .bind(&input.deliverables)
            .bind(input.sort_order)
            .bind(input.is_active)
            .bind(input.featured)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM services WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
