#![allow(dead_code)]

use std::sync::{Arc, Mutex, OnceLock};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use folio_api::auth::jwt::JwtConfig;
use folio_api::auth::password::hash_password;
use folio_api::config::{AdminCredentials, ServerConfig};
use folio_api::router::build_app_router;
use folio_api::state::AppState;
use folio_events::{
    DispatchConfig, DomainEvent, EmailError, EventBus, Mailer, NotificationDispatcher,
    OutgoingEmail,
};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tokio::sync::broadcast;
use tower::ServiceExt;

pub const ADMIN_EMAIL: &str = "owner@folio.test";
pub const ADMIN_PASSWORD: &str = "correct-horse-battery-staple";

/// Argon2 is deliberately slow, so hash the test password once per binary.
fn admin_password_hash() -> String {
    static HASH: OnceLock<String> = OnceLock::new();
    HASH.get_or_init(|| hash_password(ADMIN_PASSWORD).expect("hashing should succeed"))
        .clone()
}

/// Build a test `ServerConfig` with safe defaults and a known admin.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 60,
        },
        admin: Some(AdminCredentials {
            email: ADMIN_EMAIL.to_string(),
            password_hash: admin_password_hash(),
        }),
        notify_email: Some("notify@folio.test".to_string()),
        site_url: "https://folio.test".to_string(),
    }
}

/// A router plus a receiver that sees every event the handlers publish.
pub struct TestApp {
    pub router: Router,
    pub events: broadcast::Receiver<DomainEvent>,
}

impl TestApp {
    /// A fresh clone of the router for one `oneshot` call.
    pub fn app(&self) -> Router {
        self.router.clone()
    }

    /// Drain every event published so far.
    pub fn published(&mut self) -> Vec<DomainEvent> {
        let mut out = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            out.push(event);
        }
        out
    }
}

/// Build the full application router with the production middleware stack.
pub fn build_test_app(pool: PgPool) -> Router {
    spawn_test_app(pool).router
}

pub fn spawn_test_app(pool: PgPool) -> TestApp {
    let config = test_config();
    let event_bus = Arc::new(EventBus::default());
    let events = event_bus.subscribe();

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        event_bus,
    };

    TestApp {
        router: build_app_router(state, &config),
        events,
    }
}

// ---------------------------------------------------------------------------
// Email
// ---------------------------------------------------------------------------

/// Mailer that records every email instead of sending it.
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<OutgoingEmail>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), EmailError> {
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

/// Run `events` through a dispatcher backed by a [`RecordingMailer`] and
/// return what it sent.
pub async fn deliver(pool: &PgPool, events: &[DomainEvent]) -> Vec<OutgoingEmail> {
    let mailer = Arc::new(RecordingMailer::default());
    let dispatcher = NotificationDispatcher::new(
        pool.clone(),
        mailer.clone(),
        DispatchConfig {
            owner_email: Some("notify@folio.test".to_string()),
            site_name: None,
            site_url: "https://folio.test".to_string(),
        },
    );
    for event in events {
        dispatcher.handle(event).await;
    }
    mailer.sent()
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

fn json_request(
    method: Method,
    uri: &str,
    body: &serde_json::Value,
    token: Option<&str>,
    forwarded_for: Option<&str>,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    if let Some(ip) = forwarded_for {
        builder = builder.header("x-forwarded-for", ip);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request(Method::POST, uri, &body, None, None)).await
}

/// POST as a visitor behind a proxy that reports `ip` as the client.
pub async fn post_json_from(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    ip: &str,
) -> Response<Body> {
    send(app, json_request(Method::POST, uri, &body, None, Some(ip))).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, json_request(Method::POST, uri, &body, Some(token), None)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, json_request(Method::PUT, uri, &body, Some(token), None)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Read the response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Log in as the test admin and return the access token.
pub async fn admin_token(app: Router) -> String {
    let response = post_json(
        app,
        "/api/v1/auth/login",
        serde_json::json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["access_token"]
        .as_str()
        .expect("login response must contain access_token")
        .to_string()
}
