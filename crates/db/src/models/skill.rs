//! Skill entity model and DTOs.

use folio_core::content::SkillCategory;
use folio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `skills` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Skill {
    pub id: DbId,
    pub name: String,
    pub category: String,
    pub proficiency: i32,
    pub icon_class: String,
    pub icon_image: Option<String>,
    pub description: String,
    pub years_experience: Option<f32>,
    pub sort_order: i32,
    pub is_active: bool,
    pub featured: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a skill.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSkill {
    pub name: String,
    pub category: SkillCategory,
    pub proficiency: i32,
    pub icon_class: Option<String>,
    pub icon_image: Option<String>,
    pub description: Option<String>,
    pub years_experience: Option<f32>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
    pub featured: Option<bool>,
}

/// DTO for updating a skill. Only non-`None` fields are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSkill {
    pub name: Option<String>,
    pub category: Option<SkillCategory>,
    pub proficiency: Option<i32>,
    pub icon_class: Option<String>,
    pub icon_image: Option<String>,
    pub description: Option<String>,
    pub years_experience: Option<f32>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
    pub featured: Option<bool>,
}
