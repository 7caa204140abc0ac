//! Domain records for the read-state computation.
//!
//! Timestamps cross the storage boundary as RFC 3339 text and are parsed
//! once by the reconciler; see [`crate::parse_instant`].

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persistent pairing between two users enabling message exchange.
///
/// Deactivated (never deleted) when the match is dissolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub user_a: String,
    pub user_b: String,
    pub active: bool,
    pub created_at: String,
}

impl Conversation {
    /// Creates an active conversation with a generated UUID and current timestamp.
    pub fn new(user_a: impl Into<String>, user_b: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_a: user_a.into(),
            user_b: user_b.into(),
            active: true,
            created_at: Utc::now().to_rfc3339(),
        }
    }
}

/// The most recent message recorded for a conversation.
///
/// At most one such record exists per conversation; the store replaces the
/// row on every send rather than appending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LastMessage {
    pub conversation_id: String,
    pub sender_id: String,
    pub body: String,
    pub created_at: String,
}

impl LastMessage {
    /// Creates a record stamped with the current instant.
    pub fn new(
        conversation_id: impl Into<String>,
        sender_id: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            sender_id: sender_id.into(),
            body: body.into(),
            created_at: Utc::now().to_rfc3339(),
        }
    }
}

/// Per-user, per-conversation "read up to this instant" marker.
///
/// Unique per (user, conversation) pair; absence means "never read".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadMarker {
    pub user_id: String,
    pub conversation_id: String,
    pub last_read_at: String,
}

impl ReadMarker {
    /// Creates a marker stamped with the current instant.
    pub fn new(user_id: impl Into<String>, conversation_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            conversation_id: conversation_id.into(),
            last_read_at: Utc::now().to_rfc3339(),
        }
    }
}
