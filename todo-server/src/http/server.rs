//! Axum server setup
//!
//! Server skeleton with:
//! - CORS restricted to a configured origin allow-list
//! - Tracing middleware
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::net::SocketAddr;

use axum::http::HeaderValue;
use axum::Router;
use sqlx::SqlitePool;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use super::routes;
use crate::state::AppState;

/// Origins allowed by default (local frontend dev server)
pub const DEFAULT_CORS_ORIGINS: [&str; 2] = ["http://localhost:5173", "http://127.0.0.1:5173"];

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:8000)
    pub bind_addr: SocketAddr,

    /// Origins allowed to make credentialed cross-origin requests
    pub cors_origins: Vec<HeaderValue>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            cors_origins: DEFAULT_CORS_ORIGINS
                .into_iter()
                .map(HeaderValue::from_static)
                .collect(),
        }
    }
}

impl ServerConfig {
    /// Build a config from a bind address and origin strings.
    ///
    /// # Errors
    ///
    /// Returns `ServerError::InvalidOrigin` if an origin is not a valid
    /// header value.
    pub fn new<I, S>(bind_addr: SocketAddr, cors_origins: I) -> Result<Self, ServerError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let cors_origins = cors_origins
            .into_iter()
            .map(|origin| {
                let origin = origin.as_ref().trim();
                // Credentialed CORS cannot use a wildcard origin
                if origin == "*" {
                    return Err(ServerError::InvalidOrigin(origin.to_owned()));
                }
                HeaderValue::from_str(origin)
                    .map_err(|_| ServerError::InvalidOrigin(origin.to_owned()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            bind_addr,
            cors_origins,
        })
    }
}

/// Build the application router with all routes and middleware.
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    // Credentials rule out `*` for methods and headers, so mirror the request
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(config.cors_origins.iter().cloned()))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true);

    Router::new()
        .merge(routes::health::router())
        .merge(routes::todos::router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the HTTP server until a shutdown signal arrives, then close the pool.
///
/// The schema must already exist; see [`crate::db::init_schema`].
///
/// # Example
///
/// ```ignore
/// let pool = create_pool(&database_url).await?;
/// init_schema(&pool).await?;
/// run_server(pool, ServerConfig::default()).await?;
/// ```
pub async fn run_server(pool: SqlitePool, config: ServerConfig) -> Result<(), ServerError> {
    let state = AppState::new(pool.clone());
    let app = build_router(state, &config);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid CORS origin '{0}'")]
    InvalidOrigin(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr.port(), 8000);
        assert!(config.bind_addr.ip().is_loopback());
        assert_eq!(config.cors_origins.len(), 2);
        assert_eq!(config.cors_origins[0], "http://localhost:5173");
    }

    #[test]
    fn config_from_origin_strings() {
        let addr = SocketAddr::from(([0, 0, 0, 0], 9000));
        let config = ServerConfig::new(addr, ["https://todo.example", " http://localhost:3000 "]).unwrap();
        assert_eq!(config.cors_origins.len(), 2);
        assert_eq!(config.cors_origins[1], "http://localhost:3000");
    }

    #[test]
    fn rejects_invalid_origin() {
        let addr = SocketAddr::from(([127, 0, 0, 1], 8000));
        let err = ServerConfig::new(addr, ["bad\norigin"]).unwrap_err();
        assert!(matches!(err, ServerError::InvalidOrigin(_)));

        let err = ServerConfig::new(addr, ["*"]).unwrap_err();
        assert!(matches!(err, ServerError::InvalidOrigin(_)));
    }
}
