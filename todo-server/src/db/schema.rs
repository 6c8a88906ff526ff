//! Schema creation for the todos table

use sqlx::SqlitePool;

/// Idempotently create the `todos` table.
///
/// AUTOINCREMENT keeps ids monotonic: an id is never handed out twice, even
/// after the newest row is deleted.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    tracing::info!("Ensuring todos schema exists");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS todos (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            description TEXT,
            is_completed BOOLEAN NOT NULL DEFAULT 0
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
