//! Handlers for offered services.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use folio_core::slug::resolve_slug;
use folio_core::types::DbId;
use folio_db::models::service::{CreateService, Service, UpdateService};
use folio_db::repositories::ServiceRepo;

use crate::error::AppResult;
use crate::handlers::{check_slug_update, not_found};
use crate::middleware::auth::AdminUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/services
pub async fn list_public(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Service>>>> {
    let services = ServiceRepo::list_active(&state.pool).await?;
    Ok(Json(DataResponse { data: services }))
}

/// GET /api/v1/admin/services
pub async fn list(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Service>>>> {
    let services = ServiceRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse { data: services }))
}

/// POST /api/v1/admin/services
pub async fn create(
    admin: AdminUser,
    State(state): State<AppState>,
    Json(input): Json<CreateService>,
) -> AppResult<(StatusCode, Json<DataResponse<Service>>)> {
    let slug = resolve_slug(input.slug.as_deref(), &input.title)?;
    let service = ServiceRepo::create(&state.pool, &slug, &input).await?;
    tracing::info!(service_id = service.id, slug = %service.slug, admin = %admin.email, "Service created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: service })))
}

/// GET /api/v1/admin/services/{id}
pub async fn get_by_id(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Service>>> {
    let service = ServiceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Service", id))?;
    Ok(Json(DataResponse { data: service }))
}

/// PUT /api/v1/admin/services/{id}
pub async fn update(
    admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateService>,
) -> AppResult<Json<DataResponse<Service>>> {
    check_slug_update(input.slug.as_deref())?;
    let service = ServiceRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("Service", id))?;
    tracing::info!(service_id = id, admin = %admin.email, "Service updated");
    Ok(Json(DataResponse { data: service }))
}

/// DELETE /api/v1/admin/services/{id}
pub async fn delete(
    admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if ServiceRepo::delete(&state.pool, id).await? {
        tracing::info!(service_id = id, admin = %admin.email, "Service deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Service", id))
    }
}
