//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::db::{PgSyncStore, SyncStore};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. The store is constructed once by `main` and
/// injected here; handlers never open connections of their own.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: Arc<dyn SyncStore>,
}

impl AppState {
    /// Create application state around any store implementation.
    #[must_use]
    pub fn new(store: Arc<dyn SyncStore>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { store }),
        }
    }

    /// Create application state backed by a `PostgreSQL` pool.
    #[must_use]
    pub fn from_pool(pool: PgPool) -> Self {
        Self::new(Arc::new(PgSyncStore::new(pool)))
    }

    /// Get a reference to the store.
    #[must_use]
    pub fn store(&self) -> &dyn SyncStore {
        self.inner.store.as_ref()
    }
}
