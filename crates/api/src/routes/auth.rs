use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// `/auth`: only a login endpoint. Tokens expire and are not refreshed.
pub fn router() -> Router<AppState> {
    Router::new().route("/login", post(auth::login))
}
