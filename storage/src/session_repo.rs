//! Session repository: opaque token → user lookups.
//!
//! Thin adapter over the session table the external auth service writes;
//! the server only ever resolves tokens through it.

use chrono::Utc;

use crate::error::StorageError;
use crate::sqlite_pool::SqlitePoolManager;

#[derive(Clone)]
pub struct SessionRepository {
    pool_manager: SqlitePoolManager,
}

impl SessionRepository {
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool_manager = SqlitePoolManager::new(database_url).await?;
        let repo = Self { pool_manager };
        repo.init().await?;
        Ok(repo)
    }

    async fn init(&self) -> Result<(), StorageError> {
        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS sessions (
                token TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Stores a session token for the user.
    pub async fn insert_session(&self, token: &str, user_id: &str) -> Result<(), StorageError> {
        let pool = self.pool_manager.pool();

        sqlx::query("INSERT INTO sessions (token, user_id, created_at) VALUES (?, ?, ?)")
            .bind(token)
            .bind(user_id)
            .bind(Utc::now().to_rfc3339())
            .execute(pool)
            .await?;

        Ok(())
    }

    /// Resolves a token to its user, or `None` for an unknown token.
    pub async fn find_user(&self, token: &str) -> Result<Option<String>, StorageError> {
        let pool = self.pool_manager.pool();

        let row: Option<(String,)> =
            sqlx::query_as("SELECT user_id FROM sessions WHERE token = ?")
                .bind(token)
                .fetch_optional(pool)
                .await?;

        Ok(row.map(|(user_id,)| user_id))
    }
}
