//! Todo repository
//!
//! Handles todo CRUD with proper patterns:
//! - list: single ordered query, newest id first
//! - update/delete: primary-key match and mutation in one statement, so the
//!   write lock is taken before anything is read
//! - update: `SET` list built only from supplied fields

use sqlx::{FromRow, QueryBuilder, Sqlite, SqliteConnection, SqlitePool};

use crate::db::pool::open_session;
use crate::models::{NewTodo, TodoChange, TodoPatch};

/// Todo record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub is_completed: bool,
}

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
}

impl DbError {
    fn todo_not_found(id: i64) -> Self {
        Self::NotFound {
            resource: "todo",
            id: id.to_string(),
        }
    }
}

/// Todo repository
pub struct TodoRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> TodoRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List all todos, highest id first.
    pub async fn list(&self) -> Result<Vec<Todo>, DbError> {
        let mut session = open_session(self.pool).await?;

        let todos: Vec<Todo> = sqlx::query_as(
            r#"
            SELECT id, title, description, is_completed
            FROM todos
            ORDER BY id DESC
            "#,
        )
        .fetch_all(&mut *session)
        .await?;

        session.commit().await?;
        Ok(todos)
    }

    /// Get a single todo by id.
    pub async fn get(&self, id: i64) -> Result<Todo, DbError> {
        let mut session = open_session(self.pool).await?;
        let todo = find(&mut session, id)
            .await?
            .ok_or_else(|| DbError::todo_not_found(id))?;

        session.commit().await?;
        Ok(todo)
    }

    /// Insert a new todo. The id is assigned by storage.
    pub async fn create(&self, new: NewTodo) -> Result<Todo, DbError> {
        let mut session = open_session(self.pool).await?;

        let todo: Todo = sqlx::query_as(
            r#"
            INSERT INTO todos (title, description, is_completed)
            VALUES (?, ?, ?)
            RETURNING id, title, description, is_completed
            "#,
        )
        .bind(new.title.into_string())
        .bind(new.description)
        .bind(new.is_completed)
        .fetch_one(&mut *session)
        .await?;

        session.commit().await?;
        tracing::debug!(id = todo.id, "todo created");
        Ok(todo)
    }

    /// Apply a sparse patch to an existing todo.
    ///
    /// Fields absent from the patch are not written. An empty patch returns
    /// the current row unchanged.
    ///
    /// The `UPDATE` is the first statement of the session, so the existence
    /// check (`WHERE id = ?`) and the write take SQLite's write lock together.
    /// Reading first would hold a snapshot that cannot be upgraded once another
    /// connection commits, failing with `SQLITE_BUSY` instead of waiting.
    pub async fn update(&self, id: i64, patch: &TodoPatch) -> Result<Todo, DbError> {
        if patch.is_empty() {
            return self.get(id).await;
        }

        let mut session = open_session(self.pool).await?;

        let mut query = QueryBuilder::<Sqlite>::new("UPDATE todos SET ");
        let mut set = query.separated(", ");
        for change in patch.changes() {
            set.push(format!("{} = ", change.column()));
            match change {
                TodoChange::Title(title) => set.push_bind_unseparated(title.as_str().to_owned()),
                TodoChange::Description(description) => {
                    set.push_bind_unseparated(description.clone())
                }
                TodoChange::Completed(done) => set.push_bind_unseparated(*done),
            };
        }
        query.push(" WHERE id = ").push_bind(id);

        let result = query.build().execute(&mut *session).await?;
        if result.rows_affected() == 0 {
            return Err(DbError::todo_not_found(id));
        }

        let todo = find(&mut session, id)
            .await?
            .ok_or_else(|| DbError::todo_not_found(id))?;

        session.commit().await?;
        tracing::debug!(id, fields = patch.changes().len(), "todo updated");
        Ok(todo)
    }

    /// Permanently delete a todo.
    ///
    /// A single `DELETE` doubles as the existence check, for the same locking
    /// reason as `update`.
    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let mut session = open_session(self.pool).await?;

        let result = sqlx::query("DELETE FROM todos WHERE id = ?")
            .bind(id)
            .execute(&mut *session)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::todo_not_found(id));
        }

        session.commit().await?;
        tracing::debug!(id, "todo deleted");
        Ok(())
    }
}

/// Point lookup by primary key on an open session.
async fn find(conn: &mut SqliteConnection, id: i64) -> Result<Option<Todo>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT id, title, description, is_completed
        FROM todos
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(conn)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, init_schema};
    use crate::models::TodoTitle;

    async fn test_pool() -> SqlitePool {
        let pool = create_pool("sqlite::memory:").await.unwrap();
        init_schema(&pool).await.unwrap();
        pool
    }

    fn new_todo(title: &str) -> NewTodo {
        NewTodo {
            title: TodoTitle::new(title).unwrap(),
            description: None,
            is_completed: false,
        }
    }

    #[tokio::test]
    async fn create_assigns_increasing_ids() {
        let pool = test_pool().await;
        let repo = TodoRepo::new(&pool);

        let first = repo.create(new_todo("first")).await.unwrap();
        let second = repo.create(new_todo("second")).await.unwrap();

        assert!(second.id > first.id);
        assert!(!first.is_completed);
    }

    #[tokio::test]
    async fn ids_not_reused_after_delete() {
        let pool = test_pool().await;
        let repo = TodoRepo::new(&pool);

        let first = repo.create(new_todo("first")).await.unwrap();
        repo.delete(first.id).await.unwrap();
        let second = repo.create(new_todo("second")).await.unwrap();

        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn list_orders_by_id_desc() {
        let pool = test_pool().await;
        let repo = TodoRepo::new(&pool);
        for title in ["a", "b", "c"] {
            repo.create(new_todo(title)).await.unwrap();
        }

        let ids: Vec<i64> = repo.list().await.unwrap().iter().map(|t| t.id).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        assert_eq!(ids, sorted);
        assert_eq!(ids.len(), 3);
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let pool = test_pool().await;
        let err = TodoRepo::new(&pool).get(42).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { resource: "todo", ref id } if id == "42"));
    }

    #[tokio::test]
    async fn update_touches_only_supplied_fields() {
        let pool = test_pool().await;
        let repo = TodoRepo::new(&pool);
        let created = repo
            .create(NewTodo {
                description: Some("2 litres".into()),
                ..new_todo("Buy milk")
            })
            .await
            .unwrap();

        let patch: TodoPatch = [TodoChange::Completed(true)].into_iter().collect();
        let updated = repo.update(created.id, &patch).await.unwrap();

        assert_eq!(updated.title, "Buy milk");
        assert_eq!(updated.description.as_deref(), Some("2 litres"));
        assert!(updated.is_completed);
    }

    #[tokio::test]
    async fn update_can_clear_description() {
        let pool = test_pool().await;
        let repo = TodoRepo::new(&pool);
        let created = repo
            .create(NewTodo {
                description: Some("temp".into()),
                ..new_todo("x")
            })
            .await
            .unwrap();

        let patch: TodoPatch = [
            TodoChange::Description(None),
            TodoChange::Title(TodoTitle::new("y").unwrap()),
        ]
        .into_iter()
        .collect();
        let updated = repo.update(created.id, &patch).await.unwrap();

        assert_eq!(updated.title, "y");
        assert_eq!(updated.description, None);
    }

    #[tokio::test]
    async fn empty_patch_returns_current_row() {
        let pool = test_pool().await;
        let repo = TodoRepo::new(&pool);
        let created = repo.create(new_todo("same")).await.unwrap();

        let updated = repo.update(created.id, &TodoPatch::default()).await.unwrap();
        assert_eq!(updated, created);
    }

    #[tokio::test]
    async fn update_missing_is_not_found() {
        let pool = test_pool().await;
        let patch: TodoPatch = [TodoChange::Completed(true)].into_iter().collect();
        let err = TodoRepo::new(&pool).update(7, &patch).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn delete_twice_is_not_found() {
        let pool = test_pool().await;
        let repo = TodoRepo::new(&pool);
        let created = repo.create(new_todo("gone")).await.unwrap();

        repo.delete(created.id).await.unwrap();
        let err = repo.delete(created.id).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
        assert!(matches!(
            repo.get(created.id).await.unwrap_err(),
            DbError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn missing_table_surfaces_as_sqlx_error() {
        let pool = create_pool("sqlite::memory:").await.unwrap();
        let err = TodoRepo::new(&pool).list().await.unwrap_err();
        assert!(matches!(err, DbError::Sqlx(_)));
    }
}
