use std::sync::Arc;

use staffdir_core::store::UserStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Storage backend: Postgres in production, in-memory in demo mode
    /// and integration tests.
    pub store: Arc<dyn UserStore>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
