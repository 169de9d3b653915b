//! Repository for the `achievements` table.

use folio_core::content::AchievementCategory;
use folio_core::types::DbId;
use sqlx::PgPool;

use crate::models::achievement::{Achievement, CreateAchievement, UpdateAchievement};

const COLUMNS: &str = "\
    id, title, category, description, icon, image, date_achieved, issuer, \
    verification_url, sort_order, created_at, updated_at";

/// Provides CRUD operations for achievements.
pub struct AchievementRepo;

impl AchievementRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateAchievement,
    ) -> Result<Achievement, sqlx::Error> {
        let query = format!(
            "INSERT INTO achievements
                (title, category, description, icon, image, date_achieved, issuer,
                 verification_url, sort_order)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Achievement>(&query)
            .bind(&input.title)
            .bind(input.category.unwrap_or(AchievementCategory::Award).as_str())
            .bind(input.description.as_deref().unwrap_or_default())
            .bind(input.icon.as_deref().unwrap_or_default())
            .bind(&input.image)
            .bind(input.date_achieved)
            .bind(input.issuer.as_deref().unwrap_or_default())
            .bind(input.verification_url.as_deref().unwrap_or_default())
            .bind(input.sort_order.unwrap_or(0))
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Achievement>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM achievements WHERE id = $1");
        sqlx::query_as::<_, Achievement>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All achievements, most recent first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Achievement>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM achievements \
             ORDER BY date_achieved DESC, sort_order ASC, id DESC"
        );
        sqlx::query_as::<_, Achievement>(&query).fetch_all(pool).await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAchievement,
    ) -> Result<Option<Achievement>, sqlx::Error> {
        let query = format!(
            "UPDATE achievements SET
                title = COALESCE($2, title),
                category = COALESCE($3, category),
                description = COALESCE($4, description),
                icon = COALESCE($5, icon),
                image = COALESCE($6, image),
                date_achieved = COALESCE($7, date_achieved),
                issuer = COALESCE($8, issuer),
                verification_url = COALESCE($9, verification_url),
                sort_order = COALESCE($10, sort_order)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Achievement>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(input.category.map(|c| c.as_str()))
            .bind(&input.description)
            .bind(&input.icon)
            .bind(&input.image)
            .bind(input.date_achieved)
            .bind(&input.issuer)
            .bind(&input.verification_url)
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM achievements WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
