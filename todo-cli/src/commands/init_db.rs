//! Schema initialization command

use anyhow::{Context, Result};
use clap::Parser;

use todo_server::db::{create_pool, init_schema};

use crate::config::DEFAULT_DATABASE_URL;

/// Arguments for the init-db command
#[derive(Parser, Debug)]
pub struct InitDbArgs {
    /// Database URL (sqlx SQLite URL)
    #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    pub database_url: String,
}

/// Create the schema and exit
pub async fn run_init_db(args: InitDbArgs) -> Result<()> {
    let pool = create_pool(&args.database_url)
        .await
        .with_context(|| format!("Failed to open database {}", args.database_url))?;

    init_schema(&pool)
        .await
        .context("Failed to create database schema")?;

    pool.close().await;
    println!("Schema ready at {}", args.database_url);
    Ok(())
}
