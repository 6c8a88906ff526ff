//! Database layer - connection pool, schema and repositories
//!
//! # Design Principles
//!
//! - Connection pool (max 5 connections) - no Arc<Mutex<Connection>>
//! - One transaction per request; dropping it uncommitted rolls back
//! - Existence checks and mutations share the same transaction

pub mod pool;
pub mod repos;
pub mod schema;

pub use pool::{create_pool, create_pool_with_options, open_session, Session};
pub use repos::*;
pub use schema::init_schema;
