use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::handlers::settings::ensure_site_settings;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `"ok"`, or `"degraded"` if any check failed.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// The settings table holds exactly one row.
    pub settings_healthy: bool,
}

/// GET /health
///
/// Always answers 200; failing checks show up in the body and the log.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = match folio_db::health_check(&state.pool).await {
        Ok(()) => true,
        Err(e) => {
            tracing::error!(error = %e, "Database health check failed");
            false
        }
    };

    // Without a database the singleton cannot be checked at all.
    let settings_healthy = db_healthy
        && match ensure_site_settings(&state.pool).await {
            Ok(_) => true,
            Err(e) => {
                tracing::error!(error = %e, "Site settings check failed");
                false
            }
        };

    Json(HealthResponse {
        status: if db_healthy && settings_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        settings_healthy,
    })
}

/// Mounted at the root, outside `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
