//! Visitor form intake: contact messages and newsletter subscriptions.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{messages, newsletter};
use crate::state::AppState;

/// Intake routes, merged at the `/api/v1` root.
///
/// ```text
/// POST /contact                        -> messages::submit
/// POST /newsletter/subscribe           -> newsletter::subscribe
/// POST /newsletter/unsubscribe         -> newsletter::unsubscribe
/// GET  /newsletter/verify/{token}      -> newsletter::verify
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/contact", post(messages::submit))
        .route("/newsletter/subscribe", post(newsletter::subscribe))
        .route("/newsletter/unsubscribe", post(newsletter::unsubscribe))
        .route("/newsletter/verify/{token}", get(newsletter::verify))
}
