//! Schema DDL for the users table. Every statement is idempotent (`IF NOT EXISTS`),
//! so this runs on every start.

use crate::error::AppError;
use sqlx::SqlitePool;

/// SQLite expression yielding the current UTC time as RFC 3339 with milliseconds.
pub const NOW_RFC3339: &str = "strftime('%Y-%m-%dT%H:%M:%fZ', 'now')";

const STATEMENTS: &[(&str, &str)] = &[
    (
        "users",
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            email TEXT NOT NULL UNIQUE,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        )
        "#,
    ),
    (
        "users_email_lower_idx",
        "CREATE UNIQUE INDEX IF NOT EXISTS users_email_lower_idx ON users (lower(email))",
    ),
];

/// Create the users table and its case-insensitive email index.
pub async fn apply_migrations(pool: &SqlitePool) -> Result<(), AppError> {
    for (name, ddl) in STATEMENTS {
        tracing::debug!(object = %name, "applying ddl");
        sqlx::query(ddl).execute(pool).await?;
    }
    tracing::info!(statements = STATEMENTS.len(), "schema up to date");
    Ok(())
}
