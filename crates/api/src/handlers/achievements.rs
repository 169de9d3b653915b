use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use folio_core::types::DbId;
use folio_db::models::achievement::{Achievement, CreateAchievement, UpdateAchievement};
use folio_db::repositories::AchievementRepo;

use crate::error::AppResult;
use crate::handlers::not_found;
use crate::middleware::auth::AdminUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/achievements
///
/// Most recent first.
pub async fn list_public(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Achievement>>>> {
    let achievements = AchievementRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: achievements }))
}

/// GET /api/v1/admin/achievements
pub async fn list(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Achievement>>>> {
    let achievements = AchievementRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: achievements }))
}

/// POST /api/v1/admin/achievements
pub async fn create(
    admin: AdminUser,
    State(state): State<AppState>,
    Json(input): Json<CreateAchievement>,
) -> AppResult<(StatusCode, Json<DataResponse<Achievement>>)> {
    let achievement = AchievementRepo::create(&state.pool, &input).await?;
    tracing::info!(achievement_id = achievement.id, admin = %admin.email, "Achievement created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: achievement })))
}

/// GET /api/v1/admin/achievements/{id}
pub async fn get_by_id(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Achievement>>> {
    let achievement = AchievementRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Achievement", id))?;
    Ok(Json(DataResponse { data: achievement }))
}

/// PUT /api/v1/admin/achievements/{id}
pub async fn update(
    admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAchievement>,
) -> AppResult<Json<DataResponse<Achievement>>> {
    let achievement = AchievementRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("Achievement", id))?;
    tracing::info!(achievement_id = id, admin = %admin.email, "Achievement updated");
    Ok(Json(DataResponse { data: achievement }))
}

/// DELETE /api/v1/admin/achievements/{id}
pub async fn delete(
    admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if AchievementRepo::delete(&state.pool, id).await? {
        tracing::info!(achievement_id = id, admin = %admin.email, "Achievement deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Achievement", id))
    }
}
