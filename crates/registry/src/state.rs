//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::RegistryConfig;
use crate::services::ClientRegistry;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and owns the store handle
/// that every request borrows.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: RegistryConfig,
    pool: SqlitePool,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: RegistryConfig, pool: SqlitePool) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, pool }),
        }
    }

    /// Get a reference to the registry configuration.
    #[must_use]
    pub fn config(&self) -> &RegistryConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.inner.pool
    }

    /// Registry service bound to this state's store.
    #[must_use]
    pub fn registry(&self) -> ClientRegistry<'_> {
        ClientRegistry::new(&self.inner.pool)
    }
}
