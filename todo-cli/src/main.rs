//! todo-api CLI - runs the todo HTTP API
//!
//! - `serve`: create the schema if needed and serve HTTP until Ctrl+C/SIGTERM
//! - `init-db`: create the schema and exit

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{debug, info};

mod commands;
mod config;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "todo-api",
    author,
    version,
    about = "Todo item API server backed by SQLite"
)]
struct Cli {
    /// Enable debug logging (RUST_LOG still takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Create the todos table and exit
    InitDb(commands::init_db::InitDbArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let env_files = config::load_dotenv();
    let cli = Cli::parse();

    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug })?;
    if env_files.is_empty() {
        debug!("No .env files found (current dir or ~/.todo-api)");
    }
    for path in &env_files {
        info!("Loaded configuration from {}", path.display());
    }

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::InitDb(args) => commands::run_init_db(args).await?,
    }
    Ok(())
}
