//! Read-marker repository: per-user, per-conversation "read up to" instants.
//!
//! One row per (user, conversation) pair, upserted on every mark-as-read.
//! Concurrent upserts for the same pair are last-write-wins; overwriting a
//! recent instant with another recent instant is harmless.

use async_trait::async_trait;
use tracing::info;
use unread_core::{ReadMarker, ReadMarkerStore, SourceError};

use crate::error::StorageError;
use crate::sqlite_pool::SqlitePoolManager;

#[derive(Clone)]
pub struct ReadMarkerRepository {
    pool_manager: SqlitePoolManager,
}

impl ReadMarkerRepository {
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
            CREATE TABLE IF NOT EXISTS read_markers (
                user_id TEXT NOT NULL,
                conversation_id TEXT NOT NULL,
                last_read_at TEXT NOT NULL,
                PRIMARY KEY (user_id, conversation_id)
            )
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Returns all markers for the user across all conversations.
    pub async fn markers_for(&self, user_id: &str) -> Result<Vec<ReadMarker>, StorageError> {
        let pool = self.pool_manager.pool();

        let rows: Vec<(String, String, String)> = sqlx::query_as(
            "SELECT user_id, conversation_id, last_read_at FROM read_markers WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(user_id, conversation_id, last_read_at)| ReadMarker {
                user_id,
                conversation_id,
                last_read_at,
            })
            .collect())
    }

    /// Upserts the marker for (user, conversation) with the current instant.
    pub async fn upsert_now(
        &self,
        user_id: &str,
        conversation_id: &str,
    ) -> Result<(), StorageError> {
        let marker = ReadMarker::new(user_id, conversation_id);
        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            INSERT INTO read_markers (user_id, conversation_id, last_read_at)
            VALUES (?, ?, ?)
            ON CONFLICT(user_id, conversation_id) DO UPDATE SET
                last_read_at = excluded.last_read_at
            "#,
        )
        .bind(&marker.user_id)
        .bind(&marker.conversation_id)
        .bind(&marker.last_read_at)
        .execute(pool)
        .await?;

        info!(
            user_id = %marker.user_id,
            conversation_id = %marker.conversation_id,
            "Marked conversation read"
        );
        Ok(())
    }
}

#[async_trait]
impl ReadMarkerStore for ReadMarkerRepository {
    async fn markers_for_user(&self, user_id: &str) -> Result<Vec<ReadMarker>, SourceError> {
        self.markers_for(user_id)
            .await
            .map_err(|e| SourceError::Backend(e.to_string()))
    }

    async fn mark_read(&self, user_id: &str, conversation_id: &str) -> Result<(), SourceError> {
        self.upsert_now(user_id, conversation_id)
            .await
            .map_err(|e| SourceError::Backend(e.to_string()))
    }
}
