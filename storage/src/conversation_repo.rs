//! Conversation repository: memberships and the single latest message per
//! conversation.
//!
//! Uses SqlitePoolManager and the unread-core models. The `last_messages`
//! table keeps exactly one row per conversation; sends replace the row via
//! upsert rather than appending.

use async_trait::async_trait;
use tracing::info;
use unread_core::{
    Conversation, LastMessage, LastMessageSource, MembershipResolver, SourceError,
};

use crate::error::StorageError;
use crate::sqlite_pool::SqlitePoolManager;

#[derive(Clone)]
pub struct ConversationRepository {
    pool_manager: SqlitePoolManager,
}

impl ConversationRepository {
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
            CREATE TABLE IF NOT EXISTS conversations (
                id TEXT PRIMARY KEY,
                user_a TEXT NOT NULL,
                user_b TEXT NOT NULL,
                active INTEGER NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS last_messages (
                conversation_id TEXT PRIMARY KEY,
                sender_id TEXT NOT NULL,
                body TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_conversations_user_a ON conversations(user_a);
            CREATE INDEX IF NOT EXISTS idx_conversations_user_b ON conversations(user_b);
            CREATE INDEX IF NOT EXISTS idx_conversations_active ON conversations(active);
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Creates an active conversation between the two users and returns it.
    pub async fn create_conversation(
        &self,
        user_a: &str,
        user_b: &str,
    ) -> Result<Conversation, StorageError> {
        let conversation = Conversation::new(user_a, user_b);
        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            INSERT INTO conversations (id, user_a, user_b, active, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&conversation.id)
        .bind(&conversation.user_a)
        .bind(&conversation.user_b)
        .bind(conversation.active as i64)
        .bind(&conversation.created_at)
        .execute(pool)
        .await?;

        info!(conversation_id = %conversation.id, "Created conversation");
        Ok(conversation)
    }

    /// Marks a conversation inactive (dissolved match). Returns whether a
    /// row was changed. The row itself is never deleted.
    pub async fn deactivate(&self, conversation_id: &str) -> Result<bool, StorageError> {
        let pool = self.pool_manager.pool();

        let result = sqlx::query("UPDATE conversations SET active = 0 WHERE id = ?")
            .bind(conversation_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Returns the active conversations where the user is a participant.
    pub async fn conversations_for(&self, user_id: &str) -> Result<Vec<Conversation>, StorageError> {
        let pool = self.pool_manager.pool();

        let rows: Vec<(String, String, String, i64, String)> = sqlx::query_as(
            r#"
            SELECT id, user_a, user_b, active, created_at
            FROM conversations
            WHERE active = 1 AND (user_a = ? OR user_b = ?)
            "#,
        )
        .bind(user_id)
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, user_a, user_b, active, created_at)| Conversation {
                id,
                user_a,
                user_b,
                active: active != 0,
                created_at,
            })
            .collect())
    }

    /// Records a send by replacing the conversation's latest-message row.
    pub async fn record_latest(&self, message: &LastMessage) -> Result<(), StorageError> {
        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            INSERT INTO last_messages (conversation_id, sender_id, body, created_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(conversation_id) DO UPDATE SET
                sender_id = excluded.sender_id,
                body = excluded.body,
                created_at = excluded.created_at
            "#,
        )
        .bind(&message.conversation_id)
        .bind(&message.sender_id)
        .bind(&message.body)
        .bind(&message.created_at)
        .execute(pool)
        .await?;

        info!(
            conversation_id = %message.conversation_id,
            sender_id = %message.sender_id,
            "Recorded latest message"
        );
        Ok(())
    }

    /// Returns the latest message for each of the given conversations, in no
    /// particular order. Conversations with no message yet are absent.
    pub async fn latest_for(
        &self,
        conversation_ids: &[String],
    ) -> Result<Vec<LastMessage>, StorageError> {
        if conversation_ids.is_empty() {
            return Ok(Vec::new());
        }

        let pool = self.pool_manager.pool();
        let placeholders = vec!["?"; conversation_ids.len()].join(", ");
        let sql = format!(
            "SELECT conversation_id, sender_id, body, created_at FROM last_messages \
             WHERE conversation_id IN ({})",
            placeholders
        );

        let mut query = sqlx::query_as::<_, (String, String, String, String)>(&sql);
        for id in conversation_ids {
            query = query.bind(id);
        }

        let rows = query.fetch_all(pool).await?;
        Ok(rows
            .into_iter()
            .map(|(conversation_id, sender_id, body, created_at)| LastMessage {
                conversation_id,
                sender_id,
                body,
                created_at,
            })
            .collect())
    }
}

#[async_trait]
impl MembershipResolver for ConversationRepository {
    async fn active_conversations(&self, user_id: &str) -> Result<Vec<Conversation>, SourceError> {
        self.conversations_for(user_id)
            .await
            .map_err(|e| SourceError::Backend(e.to_string()))
    }
}

#[async_trait]
impl LastMessageSource for ConversationRepository {
    async fn last_messages(
        &self,
        conversation_ids: &[String],
    ) -> Result<Vec<LastMessage>, SourceError> {
        self.latest_for(conversation_ids)
            .await
            .map_err(|e| SourceError::Backend(e.to_string()))
    }
}
