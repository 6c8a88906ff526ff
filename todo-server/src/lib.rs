//! todo-server: HTTP API for todo items backed by SQLite
//!
//! Layers, leaves first:
//! - `db`: connection pool, schema, transactional sessions, repositories
//! - `models`: transfer contracts validated at the network boundary
//! - `http`: axum router, handlers and error responses

pub mod db;
pub mod http;
pub mod models;
pub mod state;

pub use http::{build_router, run_server, ServerConfig};
pub use state::AppState;
