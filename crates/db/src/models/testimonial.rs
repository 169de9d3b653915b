//! Testimonial entity model and DTOs.

use folio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `testimonials` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Testimonial {
    pub id: DbId,
    pub author: String,
    pub role: String,
    pub company: String,
    pub body: String,
    pub rating: i32,
    pub image: Option<String>,
    pub project_id: Option<DbId>,
    pub featured: bool,
    pub is_approved: bool,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTestimonial {
    pub author: String,
    pub role: Option<String>,
    pub company: Option<String>,
    pub body: String,
    pub rating: Option<i32>,
    pub image: Option<String>,
    pub project_id: Option<DbId>,
    pub featured: Option<bool>,
    pub is_approved: Option<bool>,
    pub sort_order: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTestimonial {
    pub author: Option<String>,
    pub role: Option<String>,
    pub company: Option<String>,
    pub body: Option<String>,
    pub rating: Option<i32>,
    pub image: Option<String>,
    pub project_id: Option<DbId>,
    pub featured: Option<bool>,
    pub is_approved: Option<bool>,
    pub sort_order: Option<i32>,
}
