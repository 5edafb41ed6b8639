use std::sync::Arc;

use valuables_db::store::ItemStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Item storage backend.
    pub items: Arc<dyn ItemStore>,
    /// Server configuration, including the item field limits.
    pub config: Arc<ServerConfig>,
}
