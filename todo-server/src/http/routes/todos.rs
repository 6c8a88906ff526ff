//! Todo endpoints
//!
//! Each handler validates its input, runs one repository call (one
//! transaction), and projects the stored row into `TodoOut`.

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use crate::db::TodoRepo;
use crate::http::error::ApiError;
use crate::http::extractors::{TodoId, ValidJson};
use crate::models::{NewTodo, TodoOut, TodoPatch};
use crate::state::AppState;

/// GET /todos - list all todos, newest id first
async fn list_todos(State(state): State<AppState>) -> Result<Json<Vec<TodoOut>>, ApiError> {
    let todos = TodoRepo::new(state.pool()).list().await?;
    Ok(Json(todos.into_iter().map(TodoOut::from).collect()))
}

/// POST /todos - create a todo
async fn create_todo(
    State(state): State<AppState>,
    ValidJson(new): ValidJson<NewTodo>,
) -> Result<(StatusCode, Json<TodoOut>), ApiError> {
    let todo = TodoRepo::new(state.pool()).create(new).await?;
    Ok((StatusCode::CREATED, Json(TodoOut::from(todo))))
}

/// GET /todos/{id} - get a single todo
async fn get_todo(
    State(state): State<AppState>,
    TodoId(id): TodoId,
) -> Result<Json<TodoOut>, ApiError> {
    let todo = TodoRepo::new(state.pool()).get(id).await?;
    Ok(Json(TodoOut::from(todo)))
}

/// PUT /todos/{id} - apply the supplied fields to a todo
async fn update_todo(
    State(state): State<AppState>,
    TodoId(id): TodoId,
    ValidJson(patch): ValidJson<TodoPatch>,
) -> Result<Json<TodoOut>, ApiError> {
    let todo = TodoRepo::new(state.pool()).update(id, &patch).await?;
    Ok(Json(TodoOut::from(todo)))
}

/// DELETE /todos/{id} - delete a todo
async fn delete_todo(
    State(state): State<AppState>,
    TodoId(id): TodoId,
) -> Result<StatusCode, ApiError> {
    TodoRepo::new(state.pool()).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Todo routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route(
            "/todos/{id}",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
}
