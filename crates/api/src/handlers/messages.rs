//! Contact form intake and the admin inbox.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use folio_core::error::CoreError;
use folio_core::pagination::{clamp_page, Page};
use folio_core::types::DbId;
use folio_core::validation::{ContactSubmission, CONTACT_RATE_LIMIT, CONTACT_RATE_WINDOW_MINS};
use folio_db::models::contact_message::{ContactMessage, MarkRead};
use folio_db::repositories::ContactMessageRepo;
use folio_events::DomainEvent;
use serde::Serialize;
use validator::Validate;

use crate::error::AppResult;
use crate::extract::ClientMeta;
use crate::handlers::{not_found, page_window};
use crate::middleware::auth::AdminUser;
use crate::query::{QueryParams, UnreadOnlyParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// Body returned for an accepted submission. Carries no row data, so a
/// discarded honeypot submission looks the same as a stored one.
#[derive(Debug, Serialize)]
pub struct SubmissionAck {
    pub message: &'static str,
}

const CONTACT_ACK: SubmissionAck = SubmissionAck {
    message: "Thank you for your message. I'll get back to you soon.",
};

// ---------------------------------------------------------------------------
// Public intake
// ---------------------------------------------------------------------------

/// POST /api/v1/contact
///
/// 1. Field validation (422 with a field map, nothing stored)
/// 2. Honeypot: a filled `website` field is acknowledged and dropped
/// 3. Store as unread unless the source address hit its rate limit (429)
/// 4. Announce for the owner and submitter emails
pub async fn submit(
    State(state): State<AppState>,
    client: ClientMeta,
    Json(input): Json<ContactSubmission>,
) -> AppResult<(StatusCode, Json<DataResponse<SubmissionAck>>)> {
    let input = input.normalized();
    input.validate()?;

    if input.is_spam() {
        tracing::info!(ip = ?client.ip_address, "Contact honeypot triggered, submission dropped");
        return Ok((StatusCode::CREATED, Json(DataResponse { data: CONTACT_ACK })));
    }

    let Some(message) = ContactMessageRepo::create_within_limit(
        &state.pool,
        &input,
        &client.submission_meta(),
        CONTACT_RATE_LIMIT,
        CONTACT_RATE_WINDOW_MINS,
    )
    .await?
    else {
        tracing::warn!(ip = ?client.ip_address, "Contact rate limit exceeded");
        return Err(
            CoreError::RateLimited("Too many messages. Please try again later.".into()).into(),
        );
    };
    tracing::info!(message_id = message.id, "Contact message received");

    state
        .event_bus
        .publish(DomainEvent::ContactReceived { message });

    Ok((StatusCode::CREATED, Json(DataResponse { data: CONTACT_ACK })))
}

// ---------------------------------------------------------------------------
// Admin inbox
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/messages?unread_only=&page=
pub async fn list(
    _admin: AdminUser,
    State(state): State<AppState>,
    QueryParams(params): QueryParams<UnreadOnlyParams>,
) -> AppResult<Json<Page<ContactMessage>>> {
    let page = clamp_page(params.page);
    let (limit, offset) = page_window(page);
    let items = ContactMessageRepo::list(&state.pool, params.unread_only, limit, offset).await?;
    let total = ContactMessageRepo::count(&state.pool, params.unread_only).await?;
    Ok(Json(Page::new(items, page, total)))
}

/// GET /api/v1/admin/messages/{id}
pub async fn get_by_id(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ContactMessage>>> {
    let message = ContactMessageRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("ContactMessage", id))?;
    Ok(Json(DataResponse { data: message }))
}

/// PUT /api/v1/admin/messages/{id}/read
pub async fn mark_read(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<MarkRead>,
) -> AppResult<Json<DataResponse<ContactMessage>>> {
    let message = ContactMessageRepo::mark_read(&state.pool, id, input.is_read)
        .await?
        .ok_or_else(|| not_found("ContactMessage", id))?;
    Ok(Json(DataResponse { data: message }))
}

/// DELETE /api/v1/admin/messages/{id}
pub async fn delete(
    admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if ContactMessageRepo::delete(&state.pool, id).await? {
        tracing::info!(message_id = id, admin = %admin.email, "Contact message deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("ContactMessage", id))
    }
}
