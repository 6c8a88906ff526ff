//! Application state shared across handlers

use sqlx::SqlitePool;
use std::sync::Arc;

/// Shared application state
///
/// Holds the process-wide pool only; handlers borrow one session from it per
/// request and keep nothing else between requests.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    pool: SqlitePool,
}

impl AppState {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            inner: Arc::new(AppStateInner { pool }),
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.inner.pool
    }
}
