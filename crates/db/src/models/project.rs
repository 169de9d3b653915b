//! Project entity model and DTOs.

use folio_core::content::{ProjectCategory, ProjectStatus};
use folio_core::ordering::ListSort;
use folio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub category: String,
    pub summary: String,
    pub description: String,
    pub tags: Vec<String>,
    pub status: String,
    pub repo_url: String,
    pub demo_url: String,
    pub image: Option<String>,
    pub featured: bool,
    pub sort_order: i32,
    pub view_count: i64,
    pub likes: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a project. `slug` is derived from `title` when absent.
///
/// `view_count` and `likes` are absent: only public endpoints move them.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub title: String,
    pub slug: Option<String>,
    pub category: Option<ProjectCategory>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub status: Option<ProjectStatus>,
    pub repo_url: Option<String>,
    pub demo_url: Option<String>,
    pub image: Option<String>,
    pub featured: Option<bool>,
    pub sort_order: Option<i32>,
}

/// DTO for updating a project. Only non-`None` fields are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProject {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub category: Option<ProjectCategory>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub status: Option<ProjectStatus>,
    pub repo_url: Option<String>,
    pub demo_url: Option<String>,
    pub image: Option<String>,
    pub featured: Option<bool>,
    pub sort_order: Option<i32>,
}

/// Filter for project listings. Every field except `sort` narrows the result.
#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    pub status: Option<ProjectStatus>,
    pub category: Option<ProjectCategory>,
    /// Rows match when their tag set intersects this list.
    pub tags: Vec<String>,
    /// Case-insensitive substring over title, summary, and description.
    pub q: Option<String>,
    pub sort: ListSort,
}

impl ProjectFilter {
    /// A filter restricted to publicly visible (completed) projects.
    pub fn public() -> Self {
        Self {
            status: Some(ProjectStatus::Completed),
            ..Default::default()
        }
    }
}
