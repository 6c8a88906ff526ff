//! Database connection pool management
//!
//! Uses sqlx SqlitePool with explicit connection limits.

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Sqlite, SqlitePool, Transaction};

/// Default maximum connections for the pool.
/// Kept low for single-user tooling.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// How long a connection waits on another connection's write lock.
const BUSY_TIMEOUT: Duration = Duration::from_secs(10);

/// Transactional handle scoped to a single request.
///
/// Rolled back on drop unless `commit` was called.
pub type Session = Transaction<'static, Sqlite>;

/// Create a SQLite connection pool.
///
/// # Arguments
///
/// * `database_url` - sqlx SQLite URL (`sqlite://todos.db`, `sqlite::memory:`)
///
/// # Errors
///
/// Returns an error if the URL is invalid or the database cannot be opened.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool("sqlite://todos.db").await?;
/// ```
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    create_pool_with_options(database_url, DEFAULT_MAX_CONNECTIONS).await
}

/// Create a SQLite connection pool with custom options.
///
/// An in-memory database lives only as long as its connection, so in-memory
/// targets get exactly one connection that is never reaped.
pub async fn create_pool_with_options(
    database_url: &str,
    max_connections: u32,
) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .busy_timeout(BUSY_TIMEOUT);

    if is_in_memory(database_url) {
        return SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect_with(options)
            .await;
    }

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}

/// Begin a request-scoped transaction.
pub async fn open_session(pool: &SqlitePool) -> Result<Session, sqlx::Error> {
    pool.begin().await
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}
