use axum::routing::{get, post};
use axum::Router;

use crate::handlers::projects;
use crate::state::AppState;

/// Public project routes mounted at `/projects`.
///
/// ```text
/// GET  /                  -> list_public
/// GET  /tags              -> tags
/// GET  /{slug}            -> get_public
/// GET  /{slug}/related    -> related
/// POST /{slug}/like       -> like
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(projects::list_public))
        .route("/tags", get(projects::tags))
        .route("/{slug}", get(projects::get_public))
        .route("/{slug}/related", get(projects::related))
        .route("/{slug}/like", post(projects::like))
}
