//! Repository for the `testimonials` table.

use folio_core::ordering::FEATURED_ORDER_SQL;
use folio_core::types::DbId;
use sqlx::PgPool;

use crate::models::testimonial::{CreateTestimonial, Testimonial, UpdateTestimonial};

const COLUMNS: &str = "\
    id, author, role, company, body, rating, image, project_id, \
    featured, is_approved, sort_order, created_at, updated_at";

/// Provides CRUD operations for testimonials.
pub struct TestimonialRepo;

impl TestimonialRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateTestimonial,
    ) -> Result<Testimonial, sqlx::Error> {
        let query = format!(
            "INSERT INTO testimonials
                (author, role, company, body, rating, image, project_id,
                 featured, is_approved, sort_order)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Testimonial>(&query)
            .bind(&input.author)
            .bind(input.role.as_deref().unwrap_or_default())
            .bind(input.company.as_deref().unwrap_or_default())
            .bind(&input.body)
            .bind(input.rating.unwrap_or(5))
            .bind(&input.image)
            .bind(input.project_id)
            .bind(input.featured.unwrap_or(false))
            .bind(input.is_approved.unwrap_or(true))
            .bind(input.sort_order.unwrap_or(0))
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Testimonial>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM testimonials WHERE id = $1");
        sqlx::query_as::<_, Testimonial>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Every testimonial, approved or not, in listing order.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Testimonial>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM testimonials ORDER BY {FEATURED_ORDER_SQL}");
        sqlx::query_as::<_, Testimonial>(&query).fetch_all(pool).await
    }

    /// Approved testimonials in listing order.
    pub async fn list_approved(pool: &PgPool) -> Result<Vec<Testimonial>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM testimonials WHERE is_approved ORDER BY {FEATURED_ORDER_SQL}"
        );
        sqlx::query_as::<_, Testimonial>(&query).fetch_all(pool).await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTestimonial,
    ) -> Result<Option<Testimonial>, sqlx::Error> {
        let query = format!(
            "UPDATE testimonials SET
                author = COALESCE($2, author),
                role = COALESCE($3, role),
                company = COALESCE($4, company),
                body = COALESCE($5, body),
                rating = COALESCE($6, rating),
                image = COALESCE($7, image),
                project_id = COALESCE($8, project_id),
                featured = COALESCE($9, featured),
                is_approved = COALESCE($10, is_approved),
                sort_order = COALESCE($11, sort_order)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Testimonial>(&query)
            .bind(id)
            .bind(&input.author)
            .bind(&input.role)
            .bind(&input.company)
            .bind(&input.body)
            .bind(input.rating)
            .bind(&input.image)
            .bind(input.project_id)
            .bind(input.featured)
            .bind(input.is_approved)
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM testimonials WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
