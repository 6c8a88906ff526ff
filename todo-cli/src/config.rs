//! Environment configuration
//!
//! Settings come from CLI flags, then environment variables, then `.env`
//! files. `.env` files never override variables that are already set.

use std::path::PathBuf;

/// Default database target (file created next to the working directory)
pub const DEFAULT_DATABASE_URL: &str = "sqlite://todos.db";

/// Default bind address
pub const DEFAULT_BIND: &str = "127.0.0.1:8000";

/// Load environment variables from .env files
///
/// Priority order (highest to lowest):
/// 1. Environment variables already set
/// 2. Current directory .env
/// 3. ~/.todo-api/.env
///
/// Runs before argument parsing so that clap's `env` fallbacks see the
/// values, which is also before tracing exists; the loaded paths are
/// returned for the caller to log.
pub fn load_dotenv() -> Vec<PathBuf> {
    let mut loaded_from = Vec::new();

    if let Ok(path) = dotenvy::dotenv() {
        loaded_from.push(path);
    }

    if let Some(env_file) = config_dir().map(|dir| dir.join(".env")) {
        if env_file.exists() && dotenvy::from_path(&env_file).is_ok() {
            loaded_from.push(env_file);
        }
    }

    loaded_from
}

/// Get the todo-api config directory path (~/.todo-api)
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".todo-api"))
}
