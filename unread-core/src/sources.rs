//! Ports onto the external stores backing the reconciler.
//!
//! Implemented by the SQLite repositories in the storage crate; the server
//! tests swap in in-memory mocks.

use async_trait::async_trait;

use crate::error::SourceError;
use crate::models::{Conversation, LastMessage, ReadMarker};

/// Resolves the active conversations a user participates in.
#[async_trait]
pub trait MembershipResolver: Send + Sync {
    /// Returns the conversations where the user is a participant and the
    /// conversation is active. No side effects.
    async fn active_conversations(&self, user_id: &str) -> Result<Vec<Conversation>, SourceError>;
}

/// Fetches the single latest message per conversation.
#[async_trait]
pub trait LastMessageSource: Send + Sync {
    /// Returns at most one record per requested id, in no guaranteed order.
    /// Conversations with no message yet are simply absent from the result.
    async fn last_messages(
        &self,
        conversation_ids: &[String],
    ) -> Result<Vec<LastMessage>, SourceError>;
}

/// Read and write access to per-user read markers.
#[async_trait]
pub trait ReadMarkerStore: Send + Sync {
    /// Returns all markers for the user across all conversations. Absence of
    /// a marker for a conversation means "never read".
    async fn markers_for_user(&self, user_id: &str) -> Result<Vec<ReadMarker>, SourceError>;

    /// Upserts the marker for (user, conversation) with the current instant.
    /// Repeated calls converge to "fully read as of the call".
    async fn mark_read(&self, user_id: &str, conversation_id: &str) -> Result<(), SourceError>;
}
