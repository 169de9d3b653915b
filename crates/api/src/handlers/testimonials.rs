//! Handlers for testimonials.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use folio_core::content::{validate_bounded, RATING_RANGE};
use folio_core::types::DbId;
use folio_db::models::testimonial::{CreateTestimonial, Testimonial, UpdateTestimonial};
use folio_db::repositories::TestimonialRepo;

use crate::error::AppResult;
use crate::handlers::not_found;
use crate::middleware::auth::AdminUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/testimonials
///
/// Approved testimonials only.
pub async fn list_public(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Testimonial>>>> {
    let testimonials = TestimonialRepo::list_approved(&state.pool).await?;
    Ok(Json(DataResponse { data: testimonials }))
}

/// GET /api/v1/admin/testimonials
pub async fn list(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Testimonial>>>> {
    let testimonials = TestimonialRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse { data: testimonials }))
}

/// POST /api/v1/admin/testimonials
pub async fn create(
    admin: AdminUser,
    State(state): State<AppState>,
    Json(input): Json<CreateTestimonial>,
) -> AppResult<(StatusCode, Json<DataResponse<Testimonial>>)> {
    if let Some(rating) = input.rating {
        validate_bounded("rating", rating, RATING_RANGE)?;
    }
    let testimonial = TestimonialRepo::create(&state.pool, &input).await?;
    tracing::info!(testimonial_id = testimonial.id, admin = %admin.email, "Testimonial created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: testimonial })))
}

/// GET /api/v1/admin/testimonials/{id}
pub async fn get_by_id(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Testimonial>>> {
    let testimonial = TestimonialRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Testimonial", id))?;
    Ok(Json(DataResponse { data: testimonial }))
}

/// PUT /api/v1/admin/testimonials/{id}
pub async fn update(
    admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTestimonial>,
) -> AppResult<Json<DataResponse<Testimonial>>> {
    if let Some(rating) = input.rating {
        validate_bounded("rating", rating, RATING_RANGE)?;
    }
    let testimonial = TestimonialRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("Testimonial", id))?;
    tracing::info!(testimonial_id = id, admin = %admin.email, "Testimonial updated");
    Ok(Json(DataResponse { data: testimonial }))
}

/// DELETE /api/v1/admin/testimonials/{id}
pub async fn delete(
    admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if TestimonialRepo::delete(&state.pool, id).await? {
        tracing::info!(testimonial_id = id, admin = %admin.email, "Testimonial deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Testimonial", id))
    }
}
