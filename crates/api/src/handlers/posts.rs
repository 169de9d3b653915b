//! Handlers for blog posts: public listing and detail, admin CRUD.
//!
//! A post entering `published` (on create or update) announces
//! [`DomainEvent::PostPublished`], which fans out to newsletter subscribers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use folio_core::ordering::RELATED_LIMIT;
use folio_core::pagination::Page;
use folio_core::slug::resolve_slug;
use folio_core::types::DbId;
use folio_db::models::blog_post::{BlogPost, BlogPostView, CreateBlogPost, PostFilter, UpdateBlogPost};
use folio_db::models::tag::TagCount;
use folio_db::repositories::BlogPostRepo;
use folio_db::DbPool;
use folio_events::{DomainEvent, EventBus};

use crate::error::AppResult;
use crate::handlers::{check_slug_update, not_found, not_found_by, page_window};
use crate::middleware::auth::AdminUser;
use crate::query::{ListParams, QueryParams};
use crate::response::{DataResponse, LikeCount};
use crate::state::AppState;

async fn list_page(pool: &DbPool, filter: &PostFilter, page: i64) -> AppResult<Page<BlogPostView>> {
    let (limit, offset) = page_window(page);
    let items = BlogPostRepo::list(pool, filter, limit, offset).await?;
    let total = BlogPostRepo::count(pool, filter).await?;
    Ok(Page::new(items, page, total).map(BlogPostView::from))
}

fn announce_published(bus: &EventBus, post: &BlogPost) {
    tracing::info!(post_id = post.id, slug = %post.slug, "Post published");
    bus.publish(DomainEvent::PostPublished {
        post_id: post.id,
        title: post.title.clone(),
        slug: post.slug.clone(),
        excerpt: post.excerpt.clone(),
    });
}

// ---------------------------------------------------------------------------
// Public
// ---------------------------------------------------------------------------

/// GET /api/v1/posts?page=&tag=&q=&sort=
///
/// Published posts only, each with its reading time.
pub async fn list_public(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<ListParams>,
) -> AppResult<Json<Page<BlogPostView>>> {
    let filter = params.post_filter(true)?;
    Ok(Json(list_page(&state.pool, &filter, params.page()).await?))
}

/// GET /api/v1/posts/tags
pub async fn tags(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<TagCount>>>> {
    let tags = BlogPostRepo::tag_counts(&state.pool).await?;
    Ok(Json(DataResponse { data: tags }))
}

/// GET /api/v1/posts/{slug}
pub async fn get_public(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<DataResponse<BlogPostView>>> {
    let post = BlogPostRepo::increment_views(&state.pool, &slug)
        .await?
        .ok_or_else(|| not_found_by("Post", slug))?;
    Ok(Json(DataResponse { data: post.into() }))
}

/// GET /api/v1/posts/{slug}/related
///
/// Does not count a view.
pub async fn related(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<DataResponse<Vec<BlogPostView>>>> {
    let post = BlogPostRepo::find_published_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| not_found_by("Post", slug))?;
    let related = BlogPostRepo::list_related(&state.pool, &post, RELATED_LIMIT)
        .await?
        .into_iter()
        .map(BlogPostView::from)
        .collect();
    Ok(Json(DataResponse { data: related }))
}

/// POST /api/v1/posts/{slug}/like
pub async fn like(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<DataResponse<LikeCount>>> {
    let likes = BlogPostRepo::increment_likes(&state.pool, &slug)
        .await?
        .ok_or_else(|| not_found_by("Post", slug))?;
    Ok(Json(DataResponse {
        data: LikeCount { likes },
    }))
}

// ---------------------------------------------------------------------------
// Admin
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/posts?page=&status=&tag=&q=
pub async fn list(
    _admin: AdminUser,
    State(state): State<AppState>,
    QueryParams(params): QueryParams<ListParams>,
) -> AppResult<Json<Page<BlogPostView>>> {
    let filter = params.post_filter(false)?;
    Ok(Json(list_page(&state.pool, &filter, params.page()).await?))
}

/// POST /api/v1/admin/posts
pub async fn create(
    admin: AdminUser,
    State(state): State<AppState>,
    Json(input): Json<CreateBlogPost>,
) -> AppResult<(StatusCode, Json<DataResponse<BlogPostView>>)> {
    let slug = resolve_slug(input.slug.as_deref(), &input.title)?;
    let post = BlogPostRepo::create(&state.pool, &slug, &input).await?;
    tracing::info!(post_id = post.id, slug = %post.slug, admin = %admin.email, "Post created");

    if post.is_published() {
        announce_published(&state.event_bus, &post);
    }

    Ok((StatusCode::CREATED, Json(DataResponse { data: post.into() })))
}

/// GET /api/v1/admin/posts/{id}
pub async fn get_by_id(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<BlogPostView>>> {
    let post = BlogPostRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Post", id))?;
    Ok(Json(DataResponse { data: post.into() }))
}

/// PUT /api/v1/admin/posts/{id}
pub async fn update(
    admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateBlogPost>,
) -> AppResult<Json<DataResponse<BlogPostView>>> {
    check_slug_update(input.slug.as_deref())?;

    let updated = BlogPostRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("Post", id))?;
    tracing::info!(post_id = id, admin = %admin.email, "Post updated");

    if updated.newly_published() {
        announce_published(&state.event_bus, &updated.post);
    }

    Ok(Json(DataResponse {
        data: updated.post.into(),
    }))
}

/// DELETE /api/v1/admin/posts/{id}
pub async fn delete(
    admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if BlogPostRepo::delete(&state.pool, id).await? {
        tracing::info!(post_id = id, admin = %admin.email, "Post deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Post", id))
    }
}
