//! Repository for the `site_settings` singleton.

use sqlx::PgPool;

use crate::models::site_settings::{SiteSettings, UpdateSiteSettings};

const COLUMNS: &str = "\
    id, site_name, tagline, site_description, about_me, profile_image, resume_file, \
    email, phone, location, timezone, \
    github_url, linkedin_url, twitter_url, instagram_url, youtube_url, \
    years_experience, projects_completed, happy_clients, coffee_consumed, code_commits, \
    meta_keywords, meta_description, google_analytics_id, \
    enable_blog, enable_newsletter, enable_testimonials, maintenance_mode, \
    available_for_work, footer_text, updated_at";

/// The fixed primary key of the only settings row.
pub const SETTINGS_ID: i16 = 1;

/// Access to the settings singleton.
pub struct SiteSettingsRepo;

impl SiteSettingsRepo {
    /// Return the settings row, creating it with defaults if absent.
    ///
    /// Concurrent first calls race on the primary key; the loser's insert
    /// turns into a no-op update, so exactly one row ever exists.
    pub async fn get_or_create(pool: &PgPool) -> Result<SiteSettings, sqlx::Error> {
        let query = format!(
            "INSERT INTO site_settings (id) VALUES ($1) \
             ON CONFLICT (id) DO UPDATE SET id = site_settings.id \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SiteSettings>(&query)
            .bind(SETTINGS_ID)
            .fetch_one(pool)
            .await
    }

    /// Apply a partial update in place, creating the row first if needed.
    pub async fn update(
        pool: &PgPool,
        input: &UpdateSiteSettings,
    ) -> Result<SiteSettings, sqlx::Error> {
        Self::get_or_create(pool).await?;

        let query = format!(
            "UPDATE site_settings SET
                site_name = COALESCE($2, site_name),
                tagline = COALESCE($3, tagline),
                site_description = COALESCE($4, site_description),
                about_me = COALESCE($5, about_me),
                profile_image = COALESCE($6, profile_image),
                resume_file = COALESCE($7, resume_file),
                email = COALESCE($8, email),
                phone = COALESCE($9, phone),
                location = COALESCE($10, location),
                timezone = COALESCE($11, timezone),
                github_url = COALESCE($12, github_url),
                linkedin_url = COALESCE($13, linkedin_url),
                twitter_url = COALESCE($14, twitter_url),
                instagram_url = COALESCE($15, instagram_url),
                youtube_url = COALESCE($16, youtube_url),
                years_experience = COALESCE($17, years_experience),
                projects_completed = COALESCE($18, projects_completed),
                happy_clients = COALESCE($19, happy_clients),
                coffee_consumed = COALESCE($20, coffee_consumed),
                code_commits = COALESCE($21, code_commits),
                meta_keywords = COALESCE($22, meta_keywords),
                meta_description = COALESCE($23, meta_description),
                google_analytics_id = COALESCE($24, google_analytics_id),
                enable_blog = COALESCE($25, enable_blog),
                enable_newsletter = COALESCE($26, enable_newsletter),
                enable_testimonials = COALESCE($27, enable_testimonials),
                maintenance_mode = COALESCE($28, maintenance_mode),
                available_for_work = COALESCE($29, available_for_work),
                footer_text = COALESCE($30, footer_text)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SiteSettings>(&query)
            .bind(SETTINGS_ID)
            .bind(&input.site_name)
            .bind(&input.tagline)
            .bind(&input.site_description)
            .bind(&input.about_me)
            .bind(&input.profile_image)
            .bind(&input.resume_file)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.location)
            .bind(&input.timezone)
            .bind(&input.github_url)
            .bind(&input.linkedin_url)
            .bind(&input.twitter_url)
            .bind(&input.instagram_url)
            .bind(&input.youtube_url)
            .bind(input.years_experience)
            .bind(input.projects_completed)
            .bind(input.happy_clients)
            .bind(input.coffee_consumed)
            .bind(input.code_commits)
            .bind(&input.meta_keywords)
            .bind(&input.meta_description)
            .bind(&input.google_analytics_id)
            .bind(input.enable_blog)
            .bind(input.enable_newsletter)
            .bind(input.enable_testimonials)
            .bind(input.maintenance_mode)
            .bind(input.available_for_work)
            .bind(&input.footer_text)
            .fetch_one(pool)
            .await
    }

    /// Number of rows in the table. Anything other than 0 or 1 means the
    /// singleton guard has been bypassed.
    pub async fn row_count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM site_settings")
            .fetch_one(pool)
            .await
    }
}
