use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{comments, posts};
use crate::state::AppState;

/// Public blog routes mounted at `/posts`.
///
/// ```text
/// GET        /                  -> list_public
/// GET        /tags              -> tags
/// GET        /{slug}            -> get_public
/// GET        /{slug}/related    -> related
/// POST       /{slug}/like       -> like
/// GET, POST  /{slug}/comments   -> comments::list_public, comments::submit
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(posts::list_public))
        .route("/tags", get(posts::tags))
        .route("/{slug}", get(posts::get_public))
        .route("/{slug}/related", get(posts::related))
        .route("/{slug}/like", post(posts::like))
        .route(
            "/{slug}/comments",
            get(comments::list_public).post(comments::submit),
        )
}
