//! Repository for the `experiences` table.

use folio_core::content::EmploymentType;
use folio_core::ordering::EXPERIENCE_ORDER_SQL;
use folio_core::types::DbId;
use sqlx::PgPool;

use crate::models::experience::{CreateExperience, Experience, UpdateExperience};

const COLUMNS: &str = "\
    id, title, company, company_url, location, employment_type, start_date, end_date, \
    description, achievements, technologies, sort_order, created_at, updated_at";

/// Provides CRUD operations for experience entries.
pub struct ExperienceRepo;

impl ExperienceRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateExperience,
    ) -> Result<Experience, sqlx::Error> {
        let query = format!(
            "INSERT INTO experiences
                (title, company, company_url, location, employment_type, start_date, end_date,
                 description, achievements, technologies, sort_order)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Experience>(&query)
            .bind(&input.title)
            .bind(&input.company)
            .bind(input.company_url.as_deref().unwrap_or_default())
            .bind(input.location.as_deref().unwrap_or_default())
            .bind(input.employment_type.unwrap_or(EmploymentType::FullTime).as_str())
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.description.as_deref().unwrap_or_default())
            .bind(input.achievements.as_deref().unwrap_or_default())
            .bind(input.technologies.as_deref().unwrap_or_default())
            .bind(input.sort_order.unwrap_or(0))
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Experience>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM experiences WHERE id = $1");
        sqlx::query_as::<_, Experience>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All entries, current roles first, then most recent start date.
    pub async fn list(pool: &PgPool) -> Result<Vec<Experience>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM experiences ORDER BY {EXPERIENCE_ORDER_SQL}");
        sqlx::query_as::<_, Experience>(&query).fetch_all(pool).await
    }

    /// Update an entry. `clear_end_date` takes precedence over `end_date`.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateExperience,
    ) -> Result<Option<Experience>, sqlx::Error> {
        let query = format!(
            "UPDATE experiences SET
                title = COALESCE($2, title),
                company = COALESCE($3, company),
                company_url = COALESCE($4, company_url),
                location = COALESCE($5, location),
                employment_type = COALESCE($6, employment_type),
                start_date = COALESCE($7, start_date),
                end_date = CASE WHEN $9 THEN NULL ELSE COALESCE($8, end_date) END,
                description = COALESCE($10, description),
                achievements = COALESCE($11, achievements),
                technologies = COALESCE($12, technologies),
                sort_order = COALESCE($13, sort_order)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Experience>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.company)
            .bind(&input.company_url)
            .bind(&input.location)
            .bind(input.employment_type.map(|t| t.as_str()))
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.clear_end_date)
            .bind(&input.description)
            .bind(&input.achievements)
            .bind(&input.technologies)
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM experiences WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
