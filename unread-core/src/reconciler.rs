//! Unread-conversation reconciliation.
//!
//! Compares each conversation's latest message against the caller's read
//! marker. The count is conversation-grained by construction: the backing
//! store keeps only the single latest message per conversation, so no
//! message-level count is derivable from this data model.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::models::{Conversation, LastMessage, ReadMarker};

/// Parses a stored RFC 3339 timestamp into an absolute instant.
///
/// Returns `None` when the text is not a valid instant; callers treat such
/// records as indeterminate rather than unread.
pub fn parse_instant(text: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

/// Counts conversations with an unseen message from the other participant.
///
/// A conversation counts as unread when its latest message was not sent by
/// `user_id` and either no read marker exists for it or the message instant
/// is strictly after the marker. Equal instants are read. Only messages
/// belonging to the given active conversations are considered.
pub fn compute_unread_count(
    user_id: &str,
    conversations: &[Conversation],
    last_messages: &[LastMessage],
    read_markers: &[ReadMarker],
) -> usize {
    let member_ids: HashSet<&str> = conversations
        .iter()
        .filter(|c| c.active)
        .map(|c| c.id.as_str())
        .collect();

    let markers: HashMap<&str, &str> = read_markers
        .iter()
        .map(|m| (m.conversation_id.as_str(), m.last_read_at.as_str()))
        .collect();

    let mut count = 0;
    for message in last_messages {
        if !member_ids.contains(message.conversation_id.as_str()) {
            continue;
        }
        // Never unread on the user's own outgoing message.
        if message.sender_id == user_id {
            continue;
        }
        match markers.get(message.conversation_id.as_str()) {
            // Never read: any foreign message makes the conversation unread.
            None => count += 1,
            Some(read_at) => {
                match (parse_instant(&message.created_at), parse_instant(read_at)) {
                    (Some(sent), Some(read)) => {
                        if sent > read {
                            count += 1;
                        }
                    }
                    _ => {
                        warn!(
                            conversation_id = %message.conversation_id,
                            "Skipping conversation with unparsable timestamp"
                        );
                    }
                }
            }
        }
    }
    count
}
