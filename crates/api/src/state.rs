use std::sync::Arc;

use folio_db::DbPool;
use folio_events::EventBus;

use crate::config::ServerConfig;

/// Shared application state available to all handlers via `State<AppState>`.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub config: Arc<ServerConfig>,
    /// Write paths publish here after their row has committed.
    pub event_bus: Arc<EventBus>,
}
