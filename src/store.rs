//! Persistence gateway for the users table.

use crate::config::AppConfig;
use crate::error::{AppError, ConfigError};
use crate::migration::NOW_RFC3339;
use crate::model::{NewUser, User, UserPatch};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

pub const DUPLICATE_EMAIL_MESSAGE: &str = "A user with this email already exists";

const USER_COLUMNS: &str = "id, email, first_name, last_name, created_at, updated_at";

/// True for URLs that address a private in-memory database.
pub fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// Open a pool, creating the database file when it does not exist yet.
/// In-memory databases live only as long as their connection, so they get exactly one
/// connection that is never recycled.
pub async fn connect_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool, AppError> {
    let opts = SqliteConnectOptions::from_str(database_url)
        .map_err(|_| ConfigError::Invalid {
            key: "DATABASE_URL",
            value: database_url.to_string(),
        })?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool_opts = if is_in_memory(database_url) {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(max_connections)
    };
    Ok(pool_opts.connect_with(opts).await?)
}

/// Explicitly constructed database client handed to handlers through `AppState`.
#[derive(Clone, Debug)]
pub struct UserStore {
    pool: SqlitePool,
}

impl UserStore {
    pub fn new(pool: SqlitePool) -> Self {
        UserStore { pool }
    }

    pub async fn connect(config: &AppConfig) -> Result<Self, AppError> {
        let pool = connect_pool(&config.database_url, config.max_connections).await?;
        tracing::info!(in_memory = is_in_memory(&config.database_url), "database pool ready");
        Ok(UserStore::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close every pooled connection. Pending queries finish first.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    pub async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub async fn list_all(&self) -> Result<Vec<User>, AppError> {
        let sql = format!("SELECT {} FROM users ORDER BY id", USER_COLUMNS);
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, User>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    /// Insert one row. `id` and both timestamps come from the database.
    pub async fn insert(&self, user: &NewUser) -> Result<User, AppError> {
        let sql = format!(
            "INSERT INTO users (email, first_name, last_name) VALUES (?, ?, ?) RETURNING {}",
            USER_COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        sqlx::query_as::<_, User>(&sql)
            .bind(&user.email)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .fetch_one(&self.pool)
            .await
            .map_err(map_write_error)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Apply the supplied fields and refresh `updated_at`. `None` when no row has `id`.
    pub async fn update(&self, id: i64, patch: &UserPatch) -> Result<Option<User>, AppError> {
        let sql = format!(
            "UPDATE users SET \
             email = COALESCE(?, email), \
             first_name = COALESCE(?, first_name), \
             last_name = COALESCE(?, last_name), \
             updated_at = {} \
             WHERE id = ? RETURNING {}",
            NOW_RFC3339, USER_COLUMNS
        );
        tracing::debug!(sql = %sql, id, "query");
        sqlx::query_as::<_, User>(&sql)
            .bind(patch.email.as_deref())
            .bind(patch.first_name.as_deref())
            .bind(patch.last_name.as_deref())
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_write_error)
    }

    /// Hard delete. Returns the number of rows removed; `0` means not found.
    pub async fn delete(&self, id: i64) -> Result<u64, AppError> {
        tracing::debug!(id, "delete user");
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

fn map_write_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db) = &e {
        if db.is_unique_violation() {
            return AppError::Conflict(DUPLICATE_EMAIL_MESSAGE.into());
        }
    }
    AppError::Db(e)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migration::apply_migrations;

    async fn store() -> UserStore {
        let pool = connect_pool("sqlite::memory:", 5).await.unwrap();
        apply_migrations(&pool).await.unwrap();
        UserStore::new(pool)
    }

    const STALE: &str = "2000-01-01T00:00:00.000Z";

    fn john() -> NewUser {
        NewUser {
            email: "john@doe.com".into(),
            first_name: "John".into(),
            last_name: "Doe".into(),
        }
    }

    #[test]
    fn detects_in_memory_urls() {
        assert!(is_in_memory("sqlite::memory:"));
        assert!(is_in_memory("sqlite:file:users?mode=memory&cache=shared"));
        assert!(!is_in_memory("sqlite://users.db"));
    }

    #[tokio::test]
    async fn insert_assigns_id_and_timestamps() {
        let store = store().await;
        let a = store.insert(&john()).await.unwrap();
        let b = store
            .insert(&NewUser {
                email: "jane@doe.com".into(),
                ..john()
            })
            .await
            .unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(a.created_at, a.updated_at);
        assert_eq!(store.list_all().await.unwrap(), vec![a, b]);
    }

    #[tokio::test]
    async fn email_is_unique_ignoring_case() {
        let store = store().await;
        store.insert(&john()).await.unwrap();
        let err = store
            .insert(&NewUser {
                email: "JOHN@Doe.com".into(),
                ..john()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(store.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_applies_only_supplied_fields() {
        let store = store().await;
        let inserted = store.insert(&john()).await.unwrap();
        sqlx::query("UPDATE users SET created_at = ?, updated_at = ? WHERE id = ?")
            .bind(STALE)
            .bind(STALE)
            .bind(inserted.id)
            .execute(store.pool())
            .await
            .unwrap();
        let created = store.find_by_id(inserted.id).await.unwrap().unwrap();

        let patch = UserPatch {
            last_name: Some("Done".into()),
            ..UserPatch::default()
        };
        let updated = store.update(created.id, &patch).await.unwrap().unwrap();
        assert_eq!(updated.last_name, "Done");
        assert_eq!(updated.first_name, created.first_name);
        assert_eq!(updated.email, created.email);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.created_at.to_rfc3339_opts(chrono::SecondsFormat::Millis, true), STALE);
        assert!(updated.updated_at > created.updated_at);

        assert!(store.update(999, &patch).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_to_taken_email_conflicts() {
        let store = store().await;
        store.insert(&john()).await.unwrap();
        let jane = store
            .insert(&NewUser {
                email: "jane@doe.com".into(),
                ..john()
            })
            .await
            .unwrap();
        let patch = UserPatch {
            email: Some("John@doe.com".into()),
            ..UserPatch::default()
        };
        assert!(matches!(store.update(jane.id, &patch).await, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn find_and_delete_signal_absence() {
        let store = store().await;
        let created = store.insert(&john()).await.unwrap();
        assert_eq!(store.find_by_id(created.id).await.unwrap(), Some(created.clone()));
        assert_eq!(store.find_by_id(42).await.unwrap(), None);
        assert_eq!(store.delete(created.id).await.unwrap(), 1);
        assert_eq!(store.delete(created.id).await.unwrap(), 0);
        assert_eq!(store.find_by_id(created.id).await.unwrap(), None);
        store.ping().await.unwrap();
    }
}
