use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable. The pool is the storage handle every handler
/// passes down to the repository; there is no global session.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: promotions_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
