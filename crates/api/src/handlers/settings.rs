//! Handlers for the site settings singleton.

use axum::extract::State;
use axum::Json;
use folio_core::error::CoreError;
use folio_db::models::site_settings::{SiteSettings, UpdateSiteSettings};
use folio_db::repositories::SiteSettingsRepo;
use folio_db::DbPool;

use crate::error::AppResult;
use crate::middleware::auth::AdminUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Load the settings row, creating it on first access, and confirm the table
/// still holds exactly one row.
pub async fn ensure_site_settings(pool: &DbPool) -> AppResult<SiteSettings> {
    let settings = SiteSettingsRepo::get_or_create(pool).await?;
    let rows = SiteSettingsRepo::row_count(pool).await?;
    if rows != 1 {
        return Err(CoreError::Internal(format!(
            "site_settings must hold exactly one row, found {rows}"
        ))
        .into());
    }
    Ok(settings)
}

/// GET /api/v1/settings
pub async fn get_public(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<SiteSettings>>> {
    let settings = SiteSettingsRepo::get_or_create(&state.pool).await?;
    Ok(Json(DataResponse { data: settings }))
}

/// GET /api/v1/admin/settings
pub async fn get(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<SiteSettings>>> {
    let settings = SiteSettingsRepo::get_or_create(&state.pool).await?;
    Ok(Json(DataResponse { data: settings }))
}

/// PUT /api/v1/admin/settings
///
/// Partial update applied in place to the singleton row.
pub async fn update(
    admin: AdminUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateSiteSettings>,
) -> AppResult<Json<DataResponse<SiteSettings>>> {
    let settings = SiteSettingsRepo::update(&state.pool, &input).await?;
    tracing::info!(admin = %admin.email, "Site settings updated");
    Ok(Json(DataResponse { data: settings }))
}
