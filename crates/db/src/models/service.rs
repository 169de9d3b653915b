//! Offered-service entity model and DTOs.

use folio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `services` table. Prices are whole cents.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Service {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub short_description: String,
    pub description: String,
    pub icon: String,
    pub image: Option<String>,
    pub starting_price_cents: Option<i64>,
    pub deliverables: Vec<String>,
    pub sort_order: i32,
    pub is_active: bool,
    pub featured: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateService {
    pub title: String,
    pub slug: Option<String>,
    pub short_description: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub image: Option<String>,
    pub starting_price_cents: Option<i64>,
    pub deliverables: Option<Vec<String>>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
    pub featured: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateService {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub short_description: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub image: Option<String>,
    pub starting_price_cents: Option<i64>,
    pub deliverables: Option<Vec<String>>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
    pub featured: Option<bool>,
}
