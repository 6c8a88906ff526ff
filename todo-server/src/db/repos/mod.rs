//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Every operation runs inside exactly one session
//! - Id-scoped operations return `DbError::NotFound` rather than an empty value
//! - Results are read back from storage, never echoed from input

pub mod todos;

pub use todos::{DbError, Todo, TodoRepo};
