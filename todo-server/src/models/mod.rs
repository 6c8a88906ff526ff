//! Transfer contracts with validation at construction
//!
//! Request bodies are checked field by field before any storage access.
//! Invalid input returns ValidationErrors, not panic.

pub mod todo;
pub mod validation;

pub use todo::{NewTodo, TodoChange, TodoOut, TodoPatch, TodoTitle};
pub use validation::{ValidationError, ValidationErrors};
