//! Experience entity model, DTOs, and the public view with derived fields.

use folio_core::content::EmploymentType;
use folio_core::experience::{duration_label, is_current};
use folio_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `experiences` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Experience {
    pub id: DbId,
    pub title: String,
    pub company: String,
    pub company_url: String,
    pub location: String,
    pub employment_type: String,
    pub start_date: Date,
    pub end_date: Option<Date>,
    pub description: String,
    pub achievements: Vec<String>,
    pub technologies: Vec<String>,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An experience row plus the values derived from its dates.
#[derive(Debug, Clone, Serialize)]
pub struct ExperienceView {
    #[serde(flatten)]
    pub experience: Experience,
    pub is_current: bool,
    pub duration: String,
}

impl ExperienceView {
    /// Derive `is_current` and `duration`, measuring open ranges up to `today`.
    pub fn new(experience: Experience, today: Date) -> Self {
        let is_current = is_current(experience.end_date);
        let duration = duration_label(experience.start_date, experience.end_date, today);
        Self {
            experience,
            is_current,
            duration,
        }
    }
}

/// DTO for creating an experience entry.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateExperience {
    pub title: String,
    pub company: String,
    pub company_url: Option<String>,
    pub location: Option<String>,
    pub employment_type: Option<EmploymentType>,
    pub start_date: Date,
    pub end_date: Option<Date>,
    pub description: Option<String>,
    pub achievements: Option<Vec<String>>,
    pub technologies: Option<Vec<String>>,
    pub sort_order: Option<i32>,
}

/// DTO for updating an experience entry.
///
/// `end_date` cannot be nulled through `COALESCE`, so marking a role as
/// current again takes `clear_end_date: true`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateExperience {
    pub title: Option<String>,
    pub company: Option<String>,
    pub company_url: Option<String>,
    pub location: Option<String>,
    pub employment_type: Option<EmploymentType>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    #[serde(default)]
    pub clear_end_date: bool,
    pub description: Option<String>,
    pub achievements: Option<Vec<String>>,
    pub technologies: Option<Vec<String>>,
    pub sort_order: Option<i32>,
}
