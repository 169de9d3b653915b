//! Repository for the `skills` table.

use folio_core::ordering::SKILL_ORDER_SQL;
use folio_core::types::DbId;
use sqlx::PgPool;

use crate::models::skill::{CreateSkill, Skill, UpdateSkill};

const COLUMNS: &str = "\
    id, name, category, proficiency, icon_class, icon_image, description, \
    years_experience, sort_order, is_active, featured, created_at, updated_at";

/// Provides CRUD operations for skills.
pub struct SkillRepo;

impl SkillRepo {
    pub async fn create(pool: &PgPool, input: &CreateSkill) -> Result<Skill, sqlx::Error> {
        let query = format!(
            "INSERT INTO skills
                (name, category, proficiency, icon_class, icon_image, description,
                 years_experience, sort_order, is_active, featured)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Skill>(&query)
            .bind(&input.name)
            .bind(input.category.as_str())
            .bind(input.proficiency)
            .bind(input.icon_class.as_deref().unwrap_or_default())
            .bind(&input.icon_image)
            .bind(input.description.as_deref().unwrap_or_default())
            .bind(input.years_experience)
            .bind(input.sort_order.unwrap_or(0))
            .bind(input.is_active.unwrap_or(true))
            .bind(input.featured.unwrap_or(false))
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Skill>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM skills WHERE id = $1");
        sqlx::query_as::<_, Skill>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All skills, grouped by category, for the admin API.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Skill>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM skills ORDER BY {SKILL_ORDER_SQL}");
        sqlx::query_as::<_, Skill>(&query).fetch_all(pool).await
    }

    /// Active skills, grouped by category.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<Skill>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM skills WHERE is_active ORDER BY {SKILL_ORDER_SQL}"
        );
        sqlx::query_as::<_, Skill>(&query).fetch_all(pool).await
    }

    /// Active skills flagged as featured.
    pub async fn list_featured(pool: &PgPool) -> Result<Vec<Skill>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM skills WHERE is_active AND featured ORDER BY {SKILL_ORDER_SQL}"
        );
        sqlx::query_as::<_, Skill>(&query).fetch_all(pool).await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSkill,
    ) -> Result<Option<Skill>, sqlx::Error> {
        let query = format!(
            "UPDATE skills SET
                name = COALESCE($2, name),
                category = COALESCE($3, category),
                proficiency = COALESCE($4, proficiency),
                icon_class = COALESCE($5, icon_class),
                icon_image = COALESCE($6, icon_image),
                description = COALESCE($7, description),
                years_experience = COALESCE($8, years_experience),
                sort_order = COALESCE($9, sort_order),
                is_active = COALESCE($10, is_active),
                featured = COALESCE($11, featured)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Skill>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.category.map(|c| c.as_str()))
            .bind(input.proficiency)
            .bind(&input.icon_class)
            .bind(&input.icon_image)
            .bind(&input.description)
            .bind(input.years_experience)
            .bind(input.sort_order)
            .bind(input.is_active)
            .bind(input.featured)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM skills WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
