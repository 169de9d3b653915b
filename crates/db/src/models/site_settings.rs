//! Site-wide settings singleton model and update DTO.

use folio_core::types::Timestamp;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The single row of the `site_settings` table (`id` is always 1).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SiteSettings {
    pub id: i16,
    pub site_name: String,
    pub tagline: String,
    pub site_description: String,
    pub about_me: String,
    pub profile_image: Option<String>,
    pub resume_file: Option<String>,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub timezone: String,
    pub github_url: String,
    pub linkedin_url: String,
    pub twitter_url: String,
    pub instagram_url: String,
    pub youtube_url: String,
    pub years_experience: i32,
    pub projects_completed: i32,
    pub happy_clients: i32,
    pub coffee_consumed: i32,
    pub code_commits: i32,
    pub meta_keywords: String,
    pub meta_description: String,
    pub google_analytics_id: String,
    pub enable_blog: bool,
    pub enable_newsletter: bool,
    pub enable_testimonials: bool,
    pub maintenance_mode: bool,
    pub available_for_work: bool,
    pub footer_text: String,
    pub updated_at: Timestamp,
}

/// DTO for updating site settings. Only non-`None` fields are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSiteSettings {
    pub site_name: Option<String>,
    pub tagline: Option<String>,
    pub site_description: Option<String>,
    pub about_me: Option<String>,
    pub profile_image: Option<String>,
    pub resume_file: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub timezone: Option<String>,
    pub github_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub twitter_url: Option<String>,
    pub instagram_url: Option<String>,
    pub youtube_url: Option<String>,
    pub years_experience: Option<i32>,
    pub projects_completed: Option<i32>,
    pub happy_clients: Option<i32>,
    pub coffee_consumed: Option<i32>,
    pub code_commits: Option<i32>,
    pub meta_keywords: Option<String>,
    pub meta_description: Option<String>,
    pub google_analytics_id: Option<String>,
    pub enable_blog: Option<bool>,
    pub enable_newsletter: Option<bool>,
    pub enable_testimonials: Option<bool>,
    pub maintenance_mode: Option<bool>,
    pub available_for_work: Option<bool>,
    pub footer_text: Option<String>,
}
