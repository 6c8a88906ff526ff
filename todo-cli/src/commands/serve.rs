//! HTTP server command
//!
//! Opens the pool, ensures the schema exists, then serves until shutdown.
//! Any failure before the listener is bound aborts startup.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;

use todo_server::db::{create_pool, init_schema};
use todo_server::http::server::DEFAULT_CORS_ORIGINS;
use todo_server::{run_server, ServerConfig};

use crate::config::{DEFAULT_BIND, DEFAULT_DATABASE_URL};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', default_value = DEFAULT_BIND)]
    pub bind: SocketAddr,

    /// Database URL (sqlx SQLite URL)
    #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    pub database_url: String,

    /// Origin allowed for cross-origin requests (repeatable)
    #[arg(
        long = "cors-origin",
        env = "TODO_CORS_ORIGINS",
        value_delimiter = ',',
        default_values_t = DEFAULT_CORS_ORIGINS.map(String::from)
    )]
    pub cors_origins: Vec<String>,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = ServerConfig::new(args.bind, &args.cors_origins)
        .context("Invalid server configuration")?;

    tracing::info!(database = %args.database_url, "Opening database");
    let pool = create_pool(&args.database_url)
        .await
        .context("Failed to create database pool")?;

    init_schema(&pool)
        .await
        .context("Failed to create database schema")?;

    tracing::info!(origins = ?args.cors_origins, "Starting todo API on {}", args.bind);

    // Run server (blocks until shutdown)
    run_server(pool, config).await.context("Server error")?;

    Ok(())
}
