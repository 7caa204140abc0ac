//! Shared application state: the source ports behind `Arc<dyn ...>` seams.

use std::sync::Arc;

use storage::{ConversationRepository, ReadMarkerRepository, SessionRepository};
use unread_core::{LastMessageSource, MembershipResolver, ReadMarkerStore};

use crate::auth::SessionVerifier;

#[derive(Clone)]
pub struct AppState {
    pub memberships: Arc<dyn MembershipResolver>,
    pub messages: Arc<dyn LastMessageSource>,
    pub markers: Arc<dyn ReadMarkerStore>,
    pub sessions: Arc<dyn SessionVerifier>,
}

impl AppState {
    /// Wires the SQLite repositories into the port seams. The conversation
    /// repository backs both membership and last-message lookups.
    pub fn new(
        conversations: ConversationRepository,
        markers: ReadMarkerRepository,
        sessions: SessionRepository,
    ) -> Self {
        let conversations = Arc::new(conversations);
        Self {
            memberships: conversations.clone(),
            messages: conversations,
            markers: Arc::new(markers),
            sessions: Arc::new(sessions),
        }
    }
}
