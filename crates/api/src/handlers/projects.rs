//! Handlers for projects: public listing and detail, admin CRUD.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use folio_core::ordering::RELATED_LIMIT;
use folio_core::pagination::Page;
use folio_core::slug::resolve_slug;
use folio_core::types::DbId;
use folio_core::views::is_view_milestone;
use folio_db::models::project::{CreateProject, Project, ProjectFilter, UpdateProject};
use folio_db::models::tag::TagCount;
use folio_db::repositories::ProjectRepo;
use folio_db::DbPool;
use folio_events::DomainEvent;

use crate::error::AppResult;
use crate::handlers::{check_slug_update, not_found, not_found_by, page_window};
use crate::middleware::auth::AdminUser;
use crate::query::{ListParams, QueryParams};
use crate::response::{DataResponse, LikeCount};
use crate::state::AppState;

async fn list_page(pool: &DbPool, filter: &ProjectFilter, page: i64) -> AppResult<Page<Project>> {
    let (limit, offset) = page_window(page);
    let items = ProjectRepo::list(pool, filter, limit, offset).await?;
    let total = ProjectRepo::count(pool, filter).await?;
    Ok(Page::new(items, page, total))
}

// ---------------------------------------------------------------------------
// Public
// ---------------------------------------------------------------------------

/// GET /api/v1/projects?page=&tag=&category=&q=&sort=
///
/// Completed projects only.
pub async fn list_public(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<ListParams>,
) -> AppResult<Json<Page<Project>>> {
    let filter = params.project_filter(true)?;
    Ok(Json(list_page(&state.pool, &filter, params.page()).await?))
}

/// GET /api/v1/projects/tags
pub async fn tags(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<TagCount>>>> {
    let tags = ProjectRepo::tag_counts(&state.pool).await?;
    Ok(Json(DataResponse { data: tags }))
}

/// GET /api/v1/projects/{slug}
///
/// Counts the view. Reaching a milestone count notifies the owner.
pub async fn get_public(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<DataResponse<Project>>> {
    let project = ProjectRepo::increment_views(&state.pool, &slug)
        .await?
        .ok_or_else(|| not_found_by("Project", slug))?;

    if is_view_milestone(project.view_count) {
        tracing::info!(
            project_id = project.id,
            view_count = project.view_count,
            "Project reached view milestone"
        );
        state.event_bus.publish(DomainEvent::ProjectViewMilestone {
            project_id: project.id,
            title: project.title.clone(),
            slug: project.slug.clone(),
            view_count: project.view_count,
        });
    }

    Ok(Json(DataResponse { data: project }))
}

/// GET /api/v1/projects/{slug}/related
///
/// Does not count a view.
pub async fn related(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<DataResponse<Vec<Project>>>> {
    let project = ProjectRepo::find_public_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| not_found_by("Project", slug))?;
    let related = ProjectRepo::list_related(&state.pool, &project, RELATED_LIMIT).await?;
    Ok(Json(DataResponse { data: related }))
}

/// POST /api/v1/projects/{slug}/like
pub async fn like(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<DataResponse<LikeCount>>> {
    let likes = ProjectRepo::increment_likes(&state.pool, &slug)
        .await?
        .ok_or_else(|| not_found_by("Project", slug))?;
    Ok(Json(DataResponse {
        data: LikeCount { likes },
    }))
}

// ---------------------------------------------------------------------------
// Admin
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/projects?page=&status=&tag=&category=&q=
pub async fn list(
    _admin: AdminUser,
    State(state): State<AppState>,
    QueryParams(params): QueryParams<ListParams>,
) -> AppResult<Json<Page<Project>>> {
    let filter = params.project_filter(false)?;
    Ok(Json(list_page(&state.pool, &filter, params.page()).await?))
}

/// POST /api/v1/admin/projects
pub async fn create(
    admin: AdminUser,
    State(state): State<AppState>,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<DataResponse<Project>>)> {
    let slug = resolve_slug(input.slug.as_deref(), &input.title)?;
    let project = ProjectRepo::create(&state.pool, &slug, &input).await?;
    tracing::info!(project_id = project.id, slug = %project.slug, admin = %admin.email, "Project created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: project })))
}

/// GET /api/v1/admin/projects/{id}
pub async fn get_by_id(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Project>>> {
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Project", id))?;
    Ok(Json(DataResponse { data: project }))
}

/// PUT /api/v1/admin/projects/{id}
pub async fn update(
    admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<DataResponse<Project>>> {
    check_slug_update(input.slug.as_deref())?;
    let project = ProjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("Project", id))?;
    tracing::info!(project_id = id, admin = %admin.email, "Project updated");
    Ok(Json(DataResponse { data: project }))
}

/// DELETE /api/v1/admin/projects/{id}
pub async fn delete(
    admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if ProjectRepo::delete(&state.pool, id).await? {
        tracing::info!(project_id = id, admin = %admin.email, "Project deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Project", id))
    }
}
