//! Handlers for skills.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use folio_core::content::{validate_bounded, PROFICIENCY_RANGE};
use folio_core::types::DbId;
use folio_db::models::skill::{CreateSkill, Skill, UpdateSkill};
use folio_db::repositories::SkillRepo;

use crate::error::AppResult;
use crate::handlers::not_found;
use crate::middleware::auth::AdminUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/skills
///
/// Active skills grouped by category.
pub async fn list_public(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Skill>>>> {
    let skills = SkillRepo::list_active(&state.pool).await?;
    Ok(Json(DataResponse { data: skills }))
}

/// GET /api/v1/admin/skills
pub async fn list(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Skill>>>> {
    let skills = SkillRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse { data: skills }))
}

/// POST /api/v1/admin/skills
pub async fn create(
    admin: AdminUser,
    State(state): State<AppState>,
    Json(input): Json<CreateSkill>,
) -> AppResult<(StatusCode, Json<DataResponse<Skill>>)> {
    validate_bounded("proficiency", input.proficiency, PROFICIENCY_RANGE)?;
    let skill = SkillRepo::create(&state.pool, &input).await?;
    tracing::info!(skill_id = skill.id, admin = %admin.email, "Skill created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: skill })))
}

/// GET /api/v1/admin/skills/{id}
pub async fn get_by_id(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Skill>>> {
    let skill = SkillRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Skill", id))?;
    Ok(Json(DataResponse { data: skill }))
}

/// PUT /api/v1/admin/skills/{id}
pub async fn update(
    admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSkill>,
) -> AppResult<Json<DataResponse<Skill>>> {
    if let Some(proficiency) = input.proficiency {
        validate_bounded("proficiency", proficiency, PROFICIENCY_RANGE)?;
    }
    let skill = SkillRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("Skill", id))?;
    tracing::info!(skill_id = id, admin = %admin.email, "Skill updated");
    Ok(Json(DataResponse { data: skill }))
}

/// DELETE /api/v1/admin/skills/{id}
pub async fn delete(
    admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if SkillRepo::delete(&state.pool, id).await? {
        tracing::info!(skill_id = id, admin = %admin.email, "Skill deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Skill", id))
    }
}
