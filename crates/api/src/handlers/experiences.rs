//! Handlers for work experience entries.
//!
//! Responses carry `is_current` and `duration`, derived on every read from the
//! stored dates.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use folio_core::experience::validate_date_range;
use folio_core::types::{Date, DbId};
use folio_db::models::experience::{CreateExperience, Experience, ExperienceView, UpdateExperience};
use folio_db::repositories::ExperienceRepo;

use crate::error::AppResult;
use crate::handlers::not_found;
use crate::middleware::auth::AdminUser;
use crate::response::DataResponse;
use crate::state::AppState;

fn today() -> Date {
    Utc::now().date_naive()
}

fn views(rows: Vec<Experience>) -> Vec<ExperienceView> {
    let today = today();
    rows.into_iter()
        .map(|e| ExperienceView::new(e, today))
        .collect()
}

/// GET /api/v1/experiences
pub async fn list_public(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ExperienceView>>>> {
    let rows = ExperienceRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: views(rows) }))
}

/// GET /api/v1/admin/experiences
pub async fn list(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ExperienceView>>>> {
    let rows = ExperienceRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: views(rows) }))
}

/// POST /api/v1/admin/experiences
pub async fn create(
    admin: AdminUser,
    State(state): State<AppState>,
    Json(input): Json<CreateExperience>,
) -> AppResult<(StatusCode, Json<DataResponse<ExperienceView>>)> {
    validate_date_range(input.start_date, input.end_date)?;
    let experience = ExperienceRepo::create(&state.pool, &input).await?;
    tracing::info!(experience_id = experience.id, admin = %admin.email, "Experience created");
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: ExperienceView::new(experience, today()),
        }),
    ))
}

/// GET /api/v1/admin/experiences/{id}
pub async fn get_by_id(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ExperienceView>>> {
    let experience = ExperienceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Experience", id))?;
    Ok(Json(DataResponse {
        data: ExperienceView::new(experience, today()),
    }))
}

/// PUT /api/v1/admin/experiences/{id}
///
/// The date range is checked against the merged result, so moving only the
/// start date past a stored end date is rejected too.
pub async fn update(
    admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateExperience>,
) -> AppResult<Json<DataResponse<ExperienceView>>> {
    let current = ExperienceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Experience", id))?;

    let start = input.start_date.unwrap_or(current.start_date);
    let end = if input.clear_end_date {
        None
    } else {
        input.end_date.or(current.end_date)
    };
    validate_date_range(start, end)?;

    let experience = ExperienceRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("Experience", id))?;
    tracing::info!(experience_id = id, admin = %admin.email, "Experience updated");
    Ok(Json(DataResponse {
        data: ExperienceView::new(experience, today()),
    }))
}

/// DELETE /api/v1/admin/experiences/{id}
pub async fn delete(
    admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if ExperienceRepo::delete(&state.pool, id).await? {
        tracing::info!(experience_id = id, admin = %admin.email, "Experience deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Experience", id))
    }
}
