//! Blog comments: public threads and submission, admin moderation.
//!
//! New comments wait for approval unless they come from the admin address.
//! A reply that becomes visible notifies the author of the parent comment.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use folio_core::error::CoreError;
use folio_core::pagination::{clamp_page, Page};
use folio_core::types::DbId;
use folio_core::validation::CommentSubmission;
use folio_db::models::blog_comment::{thread_comments, BlogComment, PublicComment, SetApproval};
use folio_db::models::blog_post::BlogPost;
use folio_db::repositories::{BlogCommentRepo, BlogPostRepo};
use folio_events::{DomainEvent, EventBus};
use serde::Serialize;
use validator::Validate;

use crate::error::AppResult;
use crate::extract::ClientMeta;
use crate::handlers::{not_found, not_found_by, page_window};
use crate::middleware::auth::AdminUser;
use crate::query::{PendingOnlyParams, QueryParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// Body returned for an accepted comment.
#[derive(Debug, Serialize)]
pub struct CommentAck {
    pub message: &'static str,
    pub approved: bool,
}

fn announce_reply(bus: &EventBus, reply: &BlogComment, parent: &BlogComment, post: &BlogPost) {
    bus.publish(DomainEvent::CommentReplyApproved {
        reply: reply.clone(),
        parent_name: parent.name.clone(),
        parent_email: parent.email.clone(),
        post_title: post.title.clone(),
        post_slug: post.slug.clone(),
    });
}

// ---------------------------------------------------------------------------
// Public
// ---------------------------------------------------------------------------

/// GET /api/v1/posts/{slug}/comments
///
/// Approved top-level comments, oldest first, each with its approved replies.
pub async fn list_public(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<DataResponse<Vec<PublicComment>>>> {
    let post = BlogPostRepo::find_published_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| not_found_by("Post", slug))?;
    if !post.allow_comments {
        return Ok(Json(DataResponse { data: Vec::new() }));
    }
    let comments = BlogCommentRepo::list_approved_for_post(&state.pool, post.id).await?;
    Ok(Json(DataResponse {
        data: thread_comments(&comments),
    }))
}

/// POST /api/v1/posts/{slug}/comments
///
/// 1. Field validation (422 with a field map, nothing stored)
/// 2. The post must be published with comments open (404 otherwise)
/// 3. A reply must target an approved top-level comment on the same post
/// 4. Store, approved only when the address is the admin's, then announce
pub async fn submit(
    State(state): State<AppState>,
    client: ClientMeta,
    Path(slug): Path<String>,
    Json(input): Json<CommentSubmission>,
) -> AppResult<(StatusCode, Json<DataResponse<CommentAck>>)> {
    let input = input.normalized();
    input.validate()?;

    let post = BlogPostRepo::find_published_by_slug(&state.pool, &slug)
        .await?
        .filter(|p| p.allow_comments)
        .ok_or_else(|| not_found_by("Post", slug))?;

    let parent = match input.parent_id {
        Some(parent_id) => {
            let parent = BlogCommentRepo::find_by_id(&state.pool, parent_id)
                .await?
                .filter(|c| c.post_id == post.id && c.is_approved && c.parent_id.is_none())
                .ok_or_else(|| {
                    CoreError::Validation(format!(
                        "Comment {parent_id} cannot be replied to on this post"
                    ))
                })?;
            Some(parent)
        }
        None => None,
    };

    let approved = state
        .config
        .admin
        .as_ref()
        .is_some_and(|admin| admin.email.eq_ignore_ascii_case(&input.email));

    let comment = BlogCommentRepo::create(
        &state.pool,
        post.id,
        &input,
        approved,
        client.ip_address.as_deref(),
    )
    .await?;
    tracing::info!(comment_id = comment.id, post_id = post.id, approved, "Comment received");

    if let (true, Some(parent)) = (approved, &parent) {
        announce_reply(&state.event_bus, &comment, parent, &post);
    }
    state.event_bus.publish(DomainEvent::CommentSubmitted {
        comment,
        post_title: post.title,
        post_slug: post.slug,
    });

    let message = if approved {
        "Your comment has been posted."
    } else {
        "Your comment is awaiting moderation."
    };
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: CommentAck { message, approved },
        }),
    ))
}

// ---------------------------------------------------------------------------
// Admin
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/comments?pending_only=&page=
pub async fn list(
    _admin: AdminUser,
    State(state): State<AppState>,
    QueryParams(params): QueryParams<PendingOnlyParams>,
) -> AppResult<Json<Page<BlogComment>>> {
    let page = clamp_page(params.page);
    let (limit, offset) = page_window(page);
    let items = BlogCommentRepo::list(&state.pool, params.pending_only, limit, offset).await?;
    let total = BlogCommentRepo::count(&state.pool, params.pending_only).await?;
    Ok(Json(Page::new(items, page, total)))
}

/// PUT /api/v1/admin/comments/{id}/approval
///
/// Approving a reply for the first time notifies the parent's author.
pub async fn set_approval(
    admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SetApproval>,
) -> AppResult<Json<DataResponse<BlogComment>>> {
    let change = BlogCommentRepo::set_approved(&state.pool, id, input.is_approved)
        .await?
        .ok_or_else(|| not_found("Comment", id))?;
    tracing::info!(comment_id = id, approved = input.is_approved, admin = %admin.email, "Comment moderated");

    if let (true, Some(parent_id)) = (change.newly_approved(), change.comment.parent_id) {
        let parent = BlogCommentRepo::find_by_id(&state.pool, parent_id).await?;
        let post = BlogPostRepo::find_by_id(&state.pool, change.comment.post_id).await?;
        if let (Some(parent), Some(post)) = (parent, post) {
            announce_reply(&state.event_bus, &change.comment, &parent, &post);
        }
    }

    Ok(Json(DataResponse {
        data: change.comment,
    }))
}

/// DELETE /api/v1/admin/comments/{id}
///
/// Replies to the comment are deleted with it.
pub async fn delete(
    admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if BlogCommentRepo::delete(&state.pool, id).await? {
        tracing::info!(comment_id = id, admin = %admin.email, "Comment deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Comment", id))
    }
}
