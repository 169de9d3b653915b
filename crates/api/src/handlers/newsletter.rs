//! Newsletter subscribe, verify, and unsubscribe, plus the admin subscriber list.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use folio_core::error::CoreError;
use folio_core::pagination::{clamp_page, Page};
use folio_core::types::DbId;
use folio_core::validation::{normalize_email, NewsletterSignup};
use folio_db::models::newsletter::{NewsletterSubscriber, SubscribeOutcome};
use folio_db::repositories::{NewsletterRepo, SiteSettingsRepo, SubscribeParams};
use folio_events::DomainEvent;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::AppResult;
use crate::extract::ClientMeta;
use crate::handlers::{not_found, not_found_by, page_window};
use crate::middleware::auth::AdminUser;
use crate::query::{ActiveOnlyParams, QueryParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// Result of a subscribe request.
#[derive(Debug, Serialize)]
pub struct SubscribeResponse {
    pub email: String,
    pub outcome: SubscribeOutcome,
    pub message: &'static str,
}

/// Request body for `POST /newsletter/unsubscribe`.
#[derive(Debug, Deserialize)]
pub struct UnsubscribeRequest {
    pub email: String,
}

/// POST /api/v1/newsletter/subscribe
///
/// Idempotent: repeating a signup for an active address changes nothing and
/// sends nothing. Only created or reactivated subscriptions get a welcome email.
pub async fn subscribe(
    State(state): State<AppState>,
    client: ClientMeta,
    Json(input): Json<NewsletterSignup>,
) -> AppResult<Json<DataResponse<SubscribeResponse>>> {
    let signup = input.normalized();
    signup.validate()?;

    let settings = SiteSettingsRepo::get_or_create(&state.pool).await?;
    if !settings.enable_newsletter {
        return Err(CoreError::Forbidden("The newsletter is currently closed".into()).into());
    }

    let token = Uuid::new_v4().to_string();
    let (subscriber, outcome) = NewsletterRepo::subscribe(
        &state.pool,
        &SubscribeParams {
            email: &signup.email,
            name: signup.name.as_deref(),
            source: signup.source.as_deref(),
            ip_address: client.ip_address.as_deref(),
            verification_token: &token,
        },
    )
    .await?;

    tracing::info!(subscriber_id = subscriber.id, ?outcome, "Newsletter signup");

    if outcome.sends_welcome() {
        state.event_bus.publish(DomainEvent::SubscriberJoined {
            email: subscriber.email.clone(),
            name: subscriber.name.clone(),
            verification_token: subscriber.verification_token.clone(),
            outcome,
        });
    }

    let message = match outcome {
        SubscribeOutcome::Created => "Thanks for subscribing! Check your inbox to confirm.",
        SubscribeOutcome::Reactivated => "Welcome back! Your subscription is active again.",
        SubscribeOutcome::AlreadySubscribed => "You're already subscribed.",
    };

    Ok(Json(DataResponse {
        data: SubscribeResponse {
            email: subscriber.email,
            outcome,
            message,
        },
    }))
}

/// GET /api/v1/newsletter/verify/{token}
pub async fn verify(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> AppResult<Json<DataResponse<NewsletterSubscriber>>> {
    let subscriber = NewsletterRepo::verify(&state.pool, &token)
        .await?
        .ok_or_else(|| not_found_by("Verification token", token))?;
    tracing::info!(subscriber_id = subscriber.id, "Newsletter subscription verified");
    Ok(Json(DataResponse { data: subscriber }))
}

/// POST /api/v1/newsletter/unsubscribe
pub async fn unsubscribe(
    State(state): State<AppState>,
    Json(input): Json<UnsubscribeRequest>,
) -> AppResult<Json<DataResponse<NewsletterSubscriber>>> {
    let email = normalize_email(&input.email);
    let subscriber = NewsletterRepo::unsubscribe(&state.pool, &email)
        .await?
        .ok_or_else(|| not_found_by("Subscriber", email))?;
    tracing::info!(subscriber_id = subscriber.id, "Newsletter unsubscribe");
    Ok(Json(DataResponse { data: subscriber }))
}

// ---------------------------------------------------------------------------
// Admin
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/subscribers?active_only=&page=
pub async fn list(
    _admin: AdminUser,
    State(state): State<AppState>,
    QueryParams(params): QueryParams<ActiveOnlyParams>,
) -> AppResult<Json<Page<NewsletterSubscriber>>> {
    let page = clamp_page(params.page);
    let (limit, offset) = page_window(page);
    let items = NewsletterRepo::list(&state.pool, params.active_only, limit, offset).await?;
    let total = NewsletterRepo::count(&state.pool, params.active_only).await?;
    Ok(Json(Page::new(items, page, total)))
}

/// DELETE /api/v1/admin/subscribers/{id}
pub async fn delete(
    admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if NewsletterRepo::delete(&state.pool, id).await? {
        tracing::info!(subscriber_id = id, admin = %admin.email, "Subscriber deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Subscriber", id))
    }
}
