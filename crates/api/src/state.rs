use std::sync::Arc;

use crate::config::ServerConfig;
use crate::uploads::MaterialStore;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`. Cheaply cloneable.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: cradle_db::DbPool,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// Filesystem store for uploaded course materials.
    pub material_store: Arc<MaterialStore>,
}
