//! Integration tests for newsletter subscribe, verify, and unsubscribe.

mod common;

use assert_matches::assert_matches;
use axum::http::StatusCode;
use common::{body_json, deliver, get, get_auth, post_json, put_json_auth};
use folio_db::models::newsletter::SubscribeOutcome;
use folio_db::repositories::NewsletterRepo;
use folio_events::DomainEvent;
use serde_json::json;
use sqlx::PgPool;

const SUBSCRIBE: &str = "/api/v1/newsletter/subscribe";
const UNSUBSCRIBE: &str = "/api/v1/newsletter/unsubscribe";

#[sqlx::test(migrations = "../db/migrations")]
async fn repeated_signup_creates_one_subscriber_and_one_welcome(pool: PgPool) {
    let mut test_app = common::spawn_test_app(pool.clone());

    let first = post_json(test_app.app(), SUBSCRIBE, json!({ "email": "bob@example.com" })).await;
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(body_json(first).await["data"]["outcome"], "created");

    let second = post_json(test_app.app(), SUBSCRIBE, json!({ "email": "bob@example.com" })).await;
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(body_json(second).await["data"]["outcome"], "already_subscribed");

    assert_eq!(NewsletterRepo::count(&pool, false).await.unwrap(), 1);

    let events = test_app.published();
    assert_eq!(events.len(), 1);
    assert_matches!(
        &events[0],
        DomainEvent::SubscriberJoined { email, outcome: SubscribeOutcome::Created, .. }
            if email == "bob@example.com"
    );

    let emails = deliver(&pool, &events).await;
    assert_eq!(emails.len(), 1);
    assert_eq!(emails[0].to, vec!["bob@example.com".to_string()]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn signup_email_is_case_insensitive(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    post_json(app.clone(), SUBSCRIBE, json!({ "email": "A@x.com" })).await;
    let response = post_json(app, SUBSCRIBE, json!({ "email": "a@x.com" })).await;

    assert_eq!(body_json(response).await["data"]["outcome"], "already_subscribed");
    assert_eq!(NewsletterRepo::count(&pool, false).await.unwrap(), 1);
    let stored = NewsletterRepo::find_by_email(&pool, "a@x.com").await.unwrap().unwrap();
    assert_eq!(stored.email, "a@x.com");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn malformed_email_returns_422(pool: PgPool) {
    let mut test_app = common::spawn_test_app(pool.clone());

    let response = post_json(test_app.app(), SUBSCRIBE, json!({ "email": "not-an-email" })).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_json(response).await["fields"]["email"].is_array());
    assert_eq!(NewsletterRepo::count(&pool, false).await.unwrap(), 0);
    assert!(test_app.published().is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn signup_is_refused_when_newsletter_disabled(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = common::admin_token(app.clone()).await;

    let response = put_json_auth(
        app.clone(),
        "/api/v1/admin/settings",
        json!({ "enable_newsletter": false }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_json(app, SUBSCRIBE, json!({ "email": "bob@example.com" })).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(NewsletterRepo::count(&pool, false).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn verification_token_confirms_once(pool: PgPool) {
    let mut test_app = common::spawn_test_app(pool.clone());
    post_json(test_app.app(), SUBSCRIBE, json!({ "email": "carol@example.com" })).await;

    let token = match test_app.published().pop() {
        Some(DomainEvent::SubscriberJoined { verification_token: Some(token), .. }) => token,
        other => panic!("expected a SubscriberJoined event with a token, got {other:?}"),
    };

    let uri = format!("/api/v1/newsletter/verify/{token}");
    let response = get(test_app.app(), &uri).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["is_verified"], true);
    assert!(json["data"].get("verification_token").is_none());

    // The token is consumed on use.
    let response = get(test_app.app(), &uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_verification_token_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/newsletter/verify/no-such-token").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unsubscribe_then_resubscribe_reactivates(pool: PgPool) {
    let mut test_app = common::spawn_test_app(pool.clone());
    post_json(test_app.app(), SUBSCRIBE, json!({ "email": "dan@example.com" })).await;

    let response =
        post_json(test_app.app(), UNSUBSCRIBE, json!({ "email": "DAN@example.com" })).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["is_active"], false);
    assert!(json["data"]["unsubscribed_at"].is_string());
    assert_eq!(NewsletterRepo::count(&pool, true).await.unwrap(), 0);

    let response = post_json(test_app.app(), SUBSCRIBE, json!({ "email": "dan@example.com" })).await;
    assert_eq!(body_json(response).await["data"]["outcome"], "reactivated");
    assert_eq!(NewsletterRepo::count(&pool, true).await.unwrap(), 1);
    assert_eq!(NewsletterRepo::count(&pool, false).await.unwrap(), 1);

    let events = test_app.published();
    assert_eq!(events.len(), 2);
    assert_matches!(
        &events[1],
        DomainEvent::SubscriberJoined { outcome: SubscribeOutcome::Reactivated, .. }
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unsubscribing_unknown_address_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, UNSUBSCRIBE, json!({ "email": "ghost@example.com" })).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn admin_lists_and_deletes_subscribers(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    post_json(app.clone(), SUBSCRIBE, json!({ "email": "erin@example.com" })).await;
    let token = common::admin_token(app.clone()).await;

    let response = get_auth(app.clone(), "/api/v1/admin/subscribers?active_only=true", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let page = body_json(response).await;
    assert_eq!(page["total"], 1);
    let id = page["items"][0]["id"].as_i64().unwrap();

    let uri = format!("/api/v1/admin/subscribers/{id}");
    let response = common::delete_auth(app, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(NewsletterRepo::count(&pool, false).await.unwrap(), 0);
}
