use std::sync::Arc;

use showcase_db::catalog::PgCatalog;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the pool and config are reference counted.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: showcase_db::DbPool,
    /// Server configuration (JWT settings, password policy).
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// The store the domain layer runs against for this request.
    pub fn catalog(&self) -> PgCatalog {
        PgCatalog::new(self.pool.clone())
    }
}
