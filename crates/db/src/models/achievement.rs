//! Achievement entity model and DTOs.

use folio_core::content::AchievementCategory;
use folio_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `achievements` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Achievement {
    pub id: DbId,
    pub title: String,
    pub category: String,
    pub description: String,
    pub icon: String,
    pub image: Option<String>,
    pub date_achieved: Date,
    pub issuer: String,
    pub verification_url: String,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAchievement {
    pub title: String,
    pub category: Option<AchievementCategory>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub image: Option<String>,
    pub date_achieved: Date,
    pub issuer: Option<String>,
    pub verification_url: Option<String>,
    pub sort_order: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAchievement {
    pub title: Option<String>,
    pub category: Option<AchievementCategory>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub image: Option<String>,
    pub date_achieved: Option<Date>,
    pub issuer: Option<String>,
    pub verification_url: Option<String>,
    pub sort_order: Option<i32>,
}
